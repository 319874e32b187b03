//! Edmonds-Karp maximum flow

use std::collections::VecDeque;

use super::{FlowNetwork, FlowSolver, NetworkError, NodeId};

/// Shortest-augmenting-path max-flow solver
#[derive(Clone, Copy, Debug, Default)]
pub struct EdmondsKarp;

/// Residual graph; edge `e` and `e ^ 1` are each other's reverse
struct Residual {
    head: Vec<usize>,
    capacity: Vec<f64>,
    infinite: Vec<bool>,
    adjacency: Vec<Vec<usize>>,
}

impl Residual {
    fn build(network: &FlowNetwork) -> Self {
        let mut residual = Self {
            head: Vec::with_capacity(network.arcs().len() * 2),
            capacity: Vec::with_capacity(network.arcs().len() * 2),
            infinite: Vec::with_capacity(network.arcs().len() * 2),
            adjacency: vec![Vec::new(); network.node_count()],
        };
        for arc in network.arcs() {
            residual.push_edge(arc.from, arc.to, arc.capacity, arc.capacity.is_infinite());
            residual.push_edge(arc.to, arc.from, 0.0, false);
        }
        residual
    }

    fn push_edge(&mut self, from: usize, to: usize, capacity: f64, infinite: bool) {
        self.adjacency[from].push(self.head.len());
        self.head.push(to);
        self.capacity.push(capacity);
        self.infinite.push(infinite);
    }

    /// BFS from `source`; returns the edge used to enter each node
    fn search(&self, source: usize, sink: usize, only_infinite: bool) -> Option<Vec<Option<usize>>> {
        let mut parent = vec![None; self.adjacency.len()];
        let mut seen = vec![false; self.adjacency.len()];
        let mut queue = VecDeque::from([source]);
        seen[source] = true;

        while let Some(node) = queue.pop_front() {
            if node == sink {
                return Some(parent);
            }
            for &edge in &self.adjacency[node] {
                let next = self.head[edge];
                let usable = if only_infinite {
                    self.infinite[edge]
                } else {
                    self.capacity[edge] > 0.0
                };
                if usable && !seen[next] {
                    seen[next] = true;
                    parent[next] = Some(edge);
                    queue.push_back(next);
                }
            }
        }

        None
    }

    /// Push the bottleneck along the path recorded in `parent`
    fn augment(&mut self, parent: &[Option<usize>], sink: usize) -> f64 {
        let mut bottleneck = f64::INFINITY;
        let mut node = sink;
        while let Some(edge) = parent[node] {
            bottleneck = bottleneck.min(self.capacity[edge]);
            node = self.head[edge ^ 1];
        }

        let mut node = sink;
        while let Some(edge) = parent[node] {
            self.capacity[edge] -= bottleneck;
            self.capacity[edge ^ 1] += bottleneck;
            node = self.head[edge ^ 1];
        }

        bottleneck
    }
}

impl FlowSolver for EdmondsKarp {
    fn max_flow(&self, network: &FlowNetwork, source: NodeId, sink: NodeId) -> Result<f64, NetworkError> {
        let s = network.index_of(source)?;
        let t = network.index_of(sink)?;
        let mut residual = Residual::build(network);

        if s == t || residual.search(s, t, true).is_some() {
            return Err(NetworkError::Unbounded(source, sink));
        }

        // Every augmenting path crosses a finite arc, so each bottleneck is finite
        let mut total = 0.0;
        while let Some(parent) = residual.search(s, t, false) {
            total += residual.augment(&parent, t);
        }

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Move;

    fn cell(row: usize, col: usize) -> NodeId {
        NodeId::Cell(Move::new(row, col))
    }

    #[test]
    fn test_parallel_paths_add_up() {
        let mut network = FlowNetwork::new();
        network.add_arc(NodeId::Source, cell(0, 0), 3.0);
        network.add_arc(NodeId::Source, cell(0, 1), 2.0);
        network.add_arc(cell(0, 0), NodeId::Sink, 2.0);
        network.add_arc(cell(0, 1), NodeId::Sink, 3.0);
        network.add_arc(cell(0, 0), cell(0, 1), 1.0);

        let flow = EdmondsKarp.max_flow(&network, NodeId::Source, NodeId::Sink).unwrap();
        assert_eq!(flow, 5.0);
    }

    #[test]
    fn test_needs_reverse_edges() {
        // Classic case where the first BFS path must be partly undone
        let mut network = FlowNetwork::new();
        network.add_arc(NodeId::Source, cell(0, 0), 1.0);
        network.add_arc(NodeId::Source, cell(0, 1), 1.0);
        network.add_arc(cell(0, 0), cell(0, 1), 1.0);
        network.add_arc(cell(0, 0), NodeId::Sink, 1.0);
        network.add_arc(cell(0, 1), NodeId::Sink, 1.0);

        let flow = EdmondsKarp.max_flow(&network, NodeId::Source, NodeId::Sink).unwrap();
        assert_eq!(flow, 2.0);
    }

    #[test]
    fn test_infinite_path_is_unbounded() {
        let mut network = FlowNetwork::new();
        network.add_arc(NodeId::Source, cell(0, 0), f64::INFINITY);
        network.add_arc(cell(0, 0), NodeId::Sink, f64::INFINITY);
        network.add_arc(NodeId::Source, cell(1, 0), 1.0);

        assert_eq!(
            EdmondsKarp.max_flow(&network, NodeId::Source, NodeId::Sink),
            Err(NetworkError::Unbounded(NodeId::Source, NodeId::Sink))
        );
    }

    #[test]
    fn test_infinite_arcs_limited_by_finite_cut() {
        let mut network = FlowNetwork::new();
        network.add_arc(NodeId::Source, cell(0, 0), f64::INFINITY);
        network.add_arc(cell(0, 0), cell(0, 1), 1.0);
        network.add_arc(cell(0, 1), NodeId::Sink, f64::INFINITY);

        let flow = EdmondsKarp.max_flow(&network, NodeId::Source, NodeId::Sink).unwrap();
        assert_eq!(flow, 1.0);
    }

    #[test]
    fn test_missing_terminal() {
        let mut network = FlowNetwork::new();
        network.add_arc(NodeId::Source, cell(0, 0), 1.0);
        assert_eq!(
            EdmondsKarp.max_flow(&network, NodeId::Source, NodeId::Sink),
            Err(NetworkError::UnknownNode(NodeId::Sink))
        );
    }
}
