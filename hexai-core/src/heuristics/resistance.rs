//! Electrical resistance between a player's two edges
//!
//! Each side's cells form a resistor mesh: links between two own stones are
//! wires (0 ohm), other links between non-opponent cells are 1 ohm, and
//! opponent stones are cut out. The lower the equivalent resistance between
//! the edges, the closer that side is to connecting.

use super::{red_minus_blue, ValueHeuristic};
use crate::board::{BoardState, Move, Player};
use crate::network::{CircuitSolver, LaplacianSolver, NodeId, ResistiveNetwork};

#[derive(Clone, Copy, Debug, Default)]
pub struct ResistanceValue<S = LaplacianSolver> {
    solver: S,
}

impl<S: CircuitSolver> ResistanceValue<S> {
    pub fn new(solver: S) -> Self {
        Self { solver }
    }

    /// Resistor mesh of `player`'s side of the board
    pub fn network(state: &BoardState, player: Player) -> ResistiveNetwork {
        let n = state.size();
        let opponent = Some(player.opponent());
        let mut network = ResistiveNetwork::new();

        for row in 0..n {
            for col in 0..n {
                let cell = Move::new(row, col);
                let owner = state.get(cell);
                if owner == opponent {
                    continue;
                }
                // Each undirected link once
                for next in state.neighbors(cell).filter(|&next| next > cell) {
                    let next_owner = state.get(next);
                    if next_owner == opponent {
                        continue;
                    }
                    let ohms = if owner == Some(player) && next_owner == Some(player) {
                        0.0
                    } else {
                        1.0
                    };
                    network.add_resistor(NodeId::Cell(cell), NodeId::Cell(next), ohms);
                }
            }
        }

        for i in 0..n {
            network.add_resistor(NodeId::Source, NodeId::Cell(player.edge_cell(i, 0)), 0.0);
            network.add_resistor(NodeId::Cell(player.edge_cell(i, n - 1)), NodeId::Sink, 0.0);
        }

        network
    }

    /// Equivalent resistance between `player`'s edges; `f64::INFINITY` when
    /// the opponent has cut them apart
    pub fn resistance(&self, state: &BoardState, player: Player) -> f64 {
        let network = Self::network(state, player);
        match self.solver.source_current(&network, NodeId::Source, NodeId::Sink) {
            Ok(current) if current == 0.0 => f64::INFINITY,
            Ok(current) => (1.0 / current).abs(),
            Err(err) => {
                tracing::warn!(%player, %err, "circuit solver failed");
                f64::INFINITY
            }
        }
    }
}

impl<S: CircuitSolver> ValueHeuristic for ResistanceValue<S> {
    fn name(&self) -> &'static str {
        "resistance"
    }

    fn compute(&self, state: &BoardState) -> f64 {
        red_minus_blue(state, |state, player| self.resistance(state, player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn value() -> ResistanceValue {
        ResistanceValue::new(LaplacianSolver)
    }

    #[test]
    fn test_empty_board_is_balanced() {
        for n in 2..=7 {
            let state = BoardState::new(n, Player::Blue).unwrap();
            let blue = value().resistance(&state, Player::Blue);
            let red = value().resistance(&state, Player::Red);
            assert!(blue.is_finite() && blue > 0.0);
            assert!((blue - red).abs() < EPS);
            assert!(value().compute(&state).abs() < EPS);
        }
    }

    #[test]
    fn test_two_by_two_empty_board() {
        // Edge wires short each column; three 1-ohm links run between them
        let state = BoardState::new(2, Player::Blue).unwrap();
        assert!((value().resistance(&state, Player::Blue) - 1.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn test_own_bridge_has_zero_resistance() {
        let row: Vec<_> = (0..5).map(|c| (Move::new(1, c), Player::Blue)).collect();
        let state = BoardState::from_cells(5, Player::Red, &row).unwrap();
        assert_eq!(value().resistance(&state, Player::Blue), 0.0);
        assert_eq!(value().resistance(&state, Player::Red), f64::INFINITY);
        assert_eq!(value().compute(&state), f64::INFINITY);
    }

    #[test]
    fn test_opponent_board_is_infinite() {
        let cells: Vec<_> = (0..4)
            .flat_map(|r| (0..4).map(move |c| (Move::new(r, c), Player::Red)))
            .collect();
        let state = BoardState::from_cells(4, Player::Blue, &cells).unwrap();
        assert_eq!(value().resistance(&state, Player::Blue), f64::INFINITY);
    }

    #[test]
    fn test_own_chain_lowers_resistance() {
        let empty = BoardState::new(5, Player::Blue).unwrap();
        let chain: Vec<_> = (1..4).map(|r| (Move::new(r, 2), Player::Red)).collect();
        let state = BoardState::from_cells(5, Player::Blue, &chain).unwrap();
        assert!(value().resistance(&state, Player::Red) < value().resistance(&empty, Player::Red));
        assert!(value().resistance(&state, Player::Blue) > value().resistance(&empty, Player::Blue));
        assert!(value().compute(&state) < 0.0);
    }
}
