//! Connectivity count: the weakest, purely local baseline

use super::{blue_minus_red, ValueHeuristic};
use crate::board::{BoardState, Move, Player};

/// Counts stones that touch at least one friendly stone
#[derive(Clone, Copy, Debug, Default)]
pub struct ConnectedValue;

impl ConnectedValue {
    /// Number of `player` stones with a same-colored neighbor
    pub fn connected(state: &BoardState, player: Player) -> f64 {
        let n = state.size();
        let mut count = 0;
        for row in 0..n {
            for col in 0..n {
                let cell = Move::new(row, col);
                if state.get(cell) == Some(player)
                    && state.neighbors(cell).any(|next| state.get(next) == Some(player))
                {
                    count += 1;
                }
            }
        }
        count as f64
    }
}

impl ValueHeuristic for ConnectedValue {
    fn name(&self) -> &'static str {
        "connected"
    }

    fn compute(&self, state: &BoardState) -> f64 {
        blue_minus_red(state, Self::connected)
    }
}
