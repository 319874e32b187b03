//! Max-flow capacity between a player's two edges

use super::{blue_minus_red, ValueHeuristic};
use crate::board::{BoardState, Move, Player};
use crate::network::{EdmondsKarp, FlowNetwork, FlowSolver, NetworkError, NodeId};

/// Scores each side by how much flow its free and owned cells can carry
/// from one edge to the other.
///
/// Links between two own stones have unlimited capacity, every other link
/// between non-opponent cells carries one unit.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaxFlowValue<S = EdmondsKarp> {
    solver: S,
}

impl<S: FlowSolver> MaxFlowValue<S> {
    pub fn new(solver: S) -> Self {
        Self { solver }
    }

    /// Capacity network of `player`'s side of the board
    pub fn network(state: &BoardState, player: Player) -> FlowNetwork {
        let n = state.size();
        let opponent = Some(player.opponent());
        let mut network = FlowNetwork::new();

        for row in 0..n {
            for col in 0..n {
                let cell = Move::new(row, col);
                let owner = state.get(cell);
                if owner == opponent {
                    continue;
                }
                for next in state.neighbors(cell) {
                    let next_owner = state.get(next);
                    if next_owner == opponent {
                        continue;
                    }
                    let capacity = if owner == Some(player) && next_owner == Some(player) {
                        f64::INFINITY
                    } else {
                        1.0
                    };
                    network.add_arc(NodeId::Cell(cell), NodeId::Cell(next), capacity);
                }
            }
        }

        for i in 0..n {
            let first = player.edge_cell(i, 0);
            if state.get(first) != opponent {
                network.add_arc(NodeId::Source, NodeId::Cell(first), f64::INFINITY);
            }
            let second = player.edge_cell(i, n - 1);
            if state.get(second) != opponent {
                network.add_arc(NodeId::Cell(second), NodeId::Sink, f64::INFINITY);
            }
        }

        network
    }

    /// Edge-to-edge flow for `player`; `f64::INFINITY` once a chain of own
    /// stones joins the edges
    pub fn flow(&self, state: &BoardState, player: Player) -> f64 {
        let network = Self::network(state, player);
        match self.solver.max_flow(&network, NodeId::Source, NodeId::Sink) {
            Ok(value) => value,
            Err(NetworkError::Unbounded(..)) => f64::INFINITY,
            // An edge fully taken by the opponent never enters the network
            Err(NetworkError::UnknownNode(_)) => 0.0,
            Err(err) => {
                tracing::warn!(%player, %err, "max-flow solver failed");
                0.0
            }
        }
    }
}

impl<S: FlowSolver> ValueHeuristic for MaxFlowValue<S> {
    fn name(&self) -> &'static str {
        "max-flow"
    }

    fn compute(&self, state: &BoardState) -> f64 {
        blue_minus_red(state, |state, player| self.flow(state, player))
    }
}
