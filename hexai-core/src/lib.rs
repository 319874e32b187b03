//! HexAI Core - Hex engine and adversarial search
//!
//! This crate provides the core game logic for HexAI:
//! - Board state with play/undo and win detection
//! - Value heuristics (connectivity, distances, flow, resistance, Y-reduction)
//! - Move ordering (random shuffle, charge-field curvature)
//! - Minimax and alpha-beta search
//! - Configurable computer player

pub mod board;
pub mod error;
pub mod heuristics;
pub mod network;
pub mod ordering;
pub mod search;
pub mod ai;
pub mod config;

// Re-exports for convenient access
pub use board::{BoardState, Move, Player, DIRECTIONS};
pub use error::HexError;
pub use heuristics::{
    ConnectedValue, MaxFlowValue, ResistanceValue, ShortestPathValue, TwoDistanceValue, ValueHeuristic,
    YReductionValue, UNREACHABLE_PENALTY,
};
pub use network::{CircuitSolver, EdmondsKarp, FlowSolver, LaplacianSolver, NetworkError};
pub use ordering::{ChargeOrder, OrderHeuristic, RandomOrder};
pub use search::{alpha_beta, minimax, search, Algorithm, SearchOutcome};
pub use ai::HexAi;
pub use config::{AiConfig, OrderKind, ValueKind};
