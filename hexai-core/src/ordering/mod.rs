//! Move ordering for the search
//!
//! An orderer only permutes the candidate moves. Alpha-beta prunes more when
//! strong moves come first, but the value it returns does not depend on the
//! order.

mod charge;
mod random;

pub use charge::{ChargeOrder, MAX_CHARGE};
pub use random::RandomOrder;

use crate::board::{BoardState, Move};

/// Reorders the moves generated at a search node
pub trait OrderHeuristic {
    /// Short kebab-case name used in configuration and reports
    fn name(&self) -> &'static str;

    /// Return a permutation of `moves`, best candidates first
    fn order(&mut self, state: &BoardState, moves: Vec<Move>) -> Vec<Move>;
}
