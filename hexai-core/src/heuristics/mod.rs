//! Position evaluation heuristics
//!
//! Every heuristic scores a position from Blue's point of view: positive
//! values favor Blue, negative values favor Red. The search maximizes for
//! Blue and minimizes for Red, so a heuristic with the opposite convention
//! would make both sides play for the wrong player.

mod connected;
mod max_flow;
mod resistance;
mod shortest_path;
mod two_distance;
mod y_reduction;

pub use connected::ConnectedValue;
pub use max_flow::MaxFlowValue;
pub use resistance::ResistanceValue;
pub use shortest_path::{edge_distance, ShortestPathValue};
pub use two_distance::{two_distance, TwoDistanceValue, UNREACHABLE_PENALTY};
pub use y_reduction::YReductionValue;

use crate::board::{BoardState, Player};

/// Static evaluator consulted at search leaves
pub trait ValueHeuristic {
    /// Short kebab-case name used in configuration and reports
    fn name(&self) -> &'static str;

    /// Score `state`; must not mutate it
    fn compute(&self, state: &BoardState) -> f64;
}

/// Blue's measure minus Red's measure
fn blue_minus_red(state: &BoardState, measure: impl Fn(&BoardState, Player) -> f64) -> f64 {
    measure(state, Player::Blue) - measure(state, Player::Red)
}

/// Red's cost minus Blue's cost (lower cost is better)
fn red_minus_blue(state: &BoardState, cost: impl Fn(&BoardState, Player) -> f64) -> f64 {
    cost(state, Player::Red) - cost(state, Player::Blue)
}
