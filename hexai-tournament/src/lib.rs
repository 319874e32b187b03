//! HexAI Tournament - comparing computer players by playing them
//!
//! This crate provides match infrastructure:
//! - Single games between two configured players, with per-move timing
//! - Matches of many trials with alternating starting player
//! - Summary statistics and a Mann-Whitney test on move latency
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 2: play_match (phases)
//! - Level 3: play_game (steps)
//! - Level 4: statistics, configuration

mod config;
mod game_runner;
mod match_play;
pub mod stats;

pub use config::MatchConfig;
pub use game_runner::{GameOutcome, GameRunner};
pub use match_play::{play_match, play_match_with, MatchResult, SideSummary};
pub use stats::{mann_whitney_less, mean, std_dev, MannWhitney, Verdict, SIGNIFICANCE};
