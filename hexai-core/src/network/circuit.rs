//! Nodal analysis of a resistor network with one unit voltage source

use std::collections::VecDeque;

use super::{CircuitSolver, NetworkError, NodeId, ResistiveNetwork};

/// Pivots smaller than this are treated as a singular system
const PIVOT_EPSILON: f64 = 1e-12;

/// Solves the reduced Laplacian (Kirchhoff) system directly.
///
/// Zero-ohm resistors are contracted first, so shorts never enter the
/// matrix. Nodes outside the positive terminal's component are dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct LaplacianSolver;

/// Union-find over node indices
struct Contraction {
    parent: Vec<usize>,
}

impl Contraction {
    fn new(len: usize) -> Self {
        Self { parent: (0..len).collect() }
    }

    fn find(&mut self, node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = node;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[rb] = ra;
        }
    }
}

impl CircuitSolver for LaplacianSolver {
    fn source_current(
        &self,
        network: &ResistiveNetwork,
        positive: NodeId,
        negative: NodeId,
    ) -> Result<f64, NetworkError> {
        let pos = network.index_of(positive)?;
        let neg = network.index_of(negative)?;
        let nodes = network.node_count();

        let mut contraction = Contraction::new(nodes);
        for r in network.resistors().iter().filter(|r| r.ohms == 0.0) {
            contraction.union(r.a, r.b);
        }
        let (pos, neg) = (contraction.find(pos), contraction.find(neg));
        if pos == neg {
            return Ok(f64::INFINITY);
        }

        // Conductances between distinct super-nodes
        let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); nodes];
        for r in network.resistors() {
            if r.ohms <= 0.0 || !r.ohms.is_finite() {
                continue;
            }
            let (a, b) = (contraction.find(r.a), contraction.find(r.b));
            if a != b {
                adjacency[a].push((b, 1.0 / r.ohms));
                adjacency[b].push((a, 1.0 / r.ohms));
            }
        }

        let component = reachable(&adjacency, pos);
        if !component[neg] {
            return Ok(0.0);
        }

        // Unknown potentials: every component node except the two terminals
        let mut unknown = vec![None; nodes];
        let mut count = 0;
        for node in 0..nodes {
            if component[node] && node != pos && node != neg {
                unknown[node] = Some(count);
                count += 1;
            }
        }

        let mut matrix = vec![vec![0.0; count]; count];
        let mut rhs = vec![0.0; count];
        for node in 0..nodes {
            let Some(i) = unknown[node] else { continue };
            for &(other, g) in &adjacency[node] {
                matrix[i][i] += g;
                match unknown[other] {
                    Some(j) => matrix[i][j] -= g,
                    None if other == pos => rhs[i] += g,
                    None => {}
                }
            }
        }

        let potentials = solve(matrix, rhs)?;
        let current = adjacency[pos]
            .iter()
            .map(|&(other, g)| {
                let v = unknown[other].map_or(0.0, |j| potentials[j]);
                g * (1.0 - v)
            })
            .sum();

        Ok(current)
    }
}

/// Nodes connected to `start` through positive conductances
fn reachable(adjacency: &[Vec<(usize, f64)>], start: usize) -> Vec<bool> {
    let mut seen = vec![false; adjacency.len()];
    let mut queue = VecDeque::from([start]);
    seen[start] = true;
    while let Some(node) = queue.pop_front() {
        for &(next, _) in &adjacency[node] {
            if !seen[next] {
                seen[next] = true;
                queue.push_back(next);
            }
        }
    }
    seen
}

/// Gaussian elimination with partial pivoting
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>, NetworkError> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() < PIVOT_EPSILON {
            return Err(NetworkError::Singular);
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Ok(x)
}
