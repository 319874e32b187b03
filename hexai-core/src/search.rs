//! Depth-limited minimax and alpha-beta search
//!
//! Both procedures walk the game tree on a single mutable board, playing a
//! move before descending and undoing it on the way back up. Blue maximizes,
//! Red minimizes; values come from a [`ValueHeuristic`] at the leaves and the
//! children of every node are visited in the order an [`OrderHeuristic`]
//! returns.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{BoardState, Move};
use crate::error::HexError;
use crate::heuristics::ValueHeuristic;
use crate::ordering::OrderHeuristic;

// ============================================================================
// TYPES
// ============================================================================

/// Search procedure
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    Minimax,
    #[default]
    AlphaBeta,
}

impl Algorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Minimax => "minimax",
            Algorithm::AlphaBeta => "alpha-beta",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimax" => Ok(Algorithm::Minimax),
            "alpha-beta" | "alphabeta" | "ab" => Ok(Algorithm::AlphaBeta),
            other => Err(HexError::Unknown {
                kind: "algorithm",
                name: other.to_string(),
            }),
        }
    }
}

/// Result of a search from the root position
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchOutcome {
    /// Backed-up value of the root
    pub value: f64,
    /// First move reaching `value`; None at a leaf
    pub best_move: Option<Move>,
    /// Positions visited, root included
    pub nodes: u64,
}

// ============================================================================
// SCOPED MOVE
// ============================================================================

/// A move played on the board for as long as the guard lives
struct Played<'a> {
    state: &'a mut BoardState,
}

impl<'a> Played<'a> {
    fn new(state: &'a mut BoardState, mv: Move) -> Option<Self> {
        if state.play(mv) {
            Some(Self { state })
        } else {
            None
        }
    }
}

impl Deref for Played<'_> {
    type Target = BoardState;

    fn deref(&self) -> &BoardState {
        self.state
    }
}

impl DerefMut for Played<'_> {
    fn deref_mut(&mut self) -> &mut BoardState {
        self.state
    }
}

impl Drop for Played<'_> {
    fn drop(&mut self) {
        // History is non-empty: the guard only exists after a successful play
        let _ = self.state.undo();
    }
}

// ============================================================================
// SEARCH
// ============================================================================

/// Run `algorithm` from `state` and return the root value and best move.
///
/// The board is left exactly as it was passed in.
pub fn search(
    algorithm: Algorithm,
    state: &mut BoardState,
    maximize: bool,
    max_depth: Option<usize>,
    value: &dyn ValueHeuristic,
    order: &mut dyn OrderHeuristic,
) -> SearchOutcome {
    let mut searcher = Searcher {
        max_depth,
        value,
        order,
        nodes: 0,
    };
    let (score, best_move) = match algorithm {
        Algorithm::Minimax => searcher.minimax(state, maximize, 0),
        Algorithm::AlphaBeta => {
            searcher.alpha_beta(state, maximize, 0, f64::NEG_INFINITY, f64::INFINITY)
        }
    };

    tracing::debug!(
        %algorithm,
        depth = ?max_depth,
        value = searcher.value.name(),
        order = searcher.order.name(),
        nodes = searcher.nodes,
        score,
        best_move = ?best_move,
        "search finished"
    );

    SearchOutcome {
        value: score,
        best_move,
        nodes: searcher.nodes,
    }
}

/// Plain minimax; every node is expanded
pub fn minimax(
    state: &mut BoardState,
    maximize: bool,
    max_depth: Option<usize>,
    value: &dyn ValueHeuristic,
    order: &mut dyn OrderHeuristic,
) -> SearchOutcome {
    search(Algorithm::Minimax, state, maximize, max_depth, value, order)
}

/// Minimax with alpha-beta cutoffs; same value and move as [`minimax`]
pub fn alpha_beta(
    state: &mut BoardState,
    maximize: bool,
    max_depth: Option<usize>,
    value: &dyn ValueHeuristic,
    order: &mut dyn OrderHeuristic,
) -> SearchOutcome {
    search(Algorithm::AlphaBeta, state, maximize, max_depth, value, order)
}

struct Searcher<'h> {
    max_depth: Option<usize>,
    value: &'h dyn ValueHeuristic,
    order: &'h mut dyn OrderHeuristic,
    nodes: u64,
}

impl Searcher<'_> {
    /// Heuristic value with NaN mapped to neutral
    fn evaluate(&self, state: &BoardState) -> f64 {
        let value = self.value.compute(state);
        if value.is_nan() {
            0.0
        } else {
            value
        }
    }

    fn depth_reached(&self, depth: usize) -> bool {
        self.max_depth.is_some_and(|max| depth >= max)
    }

    /// Candidate moves in search order; empty when the board is full
    fn children(&mut self, state: &BoardState) -> Vec<Move> {
        let moves = state.available_moves();
        self.order.order(state, moves)
    }

    fn minimax(&mut self, state: &mut BoardState, maximize: bool, depth: usize) -> (f64, Option<Move>) {
        self.nodes += 1;
        if state.check_winner().is_some() || self.depth_reached(depth) {
            return (self.evaluate(state), None);
        }

        let moves = self.children(state);
        if moves.is_empty() {
            return (self.evaluate(state), None);
        }

        let mut best = initial_bound(maximize);
        let mut best_move = None;
        for mv in moves {
            let Some(mut child) = Played::new(state, mv) else {
                continue;
            };
            let (value, _) = self.minimax(&mut child, !maximize, depth + 1);
            drop(child);

            if best_move.is_none() || improves(maximize, value, best) {
                best = value;
                best_move = Some(mv);
            }
        }

        (best, best_move)
    }

    fn alpha_beta(
        &mut self,
        state: &mut BoardState,
        maximize: bool,
        depth: usize,
        mut alpha: f64,
        mut beta: f64,
    ) -> (f64, Option<Move>) {
        self.nodes += 1;
        if let Some(winner) = state.check_winner() {
            return (winner.sign() * f64::INFINITY, None);
        }
        if self.depth_reached(depth) {
            return (self.evaluate(state), None);
        }

        let moves = self.children(state);
        if moves.is_empty() {
            return (self.evaluate(state), None);
        }

        let mut best = initial_bound(maximize);
        let mut best_move = None;
        for mv in moves {
            let Some(mut child) = Played::new(state, mv) else {
                continue;
            };
            let (value, _) = self.alpha_beta(&mut child, !maximize, depth + 1, alpha, beta);
            drop(child);

            if best_move.is_none() || improves(maximize, value, best) {
                best = value;
                best_move = Some(mv);
            }

            if maximize {
                alpha = alpha.max(value);
            } else {
                beta = beta.min(value);
            }
            if beta <= alpha {
                break;
            }
        }

        (best, best_move)
    }
}

fn initial_bound(maximize: bool) -> f64 {
    if maximize {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    }
}

fn improves(maximize: bool, value: f64, best: f64) -> bool {
    if maximize {
        value > best
    } else {
        value < best
    }
}

// ============================================================================
// TESTS
// ============================================================================
