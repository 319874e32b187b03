//! Player configuration
//!
//! `AiConfig` is the serializable description of a computer player; `build`
//! turns it into a ready `HexAi`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ai::HexAi;
use crate::error::HexError;
use crate::heuristics::{
    ConnectedValue, MaxFlowValue, ResistanceValue, ShortestPathValue, TwoDistanceValue, ValueHeuristic,
    YReductionValue,
};
use crate::network::{EdmondsKarp, LaplacianSolver};
use crate::ordering::{ChargeOrder, OrderHeuristic, RandomOrder};
use crate::search::Algorithm;

/// Search depth used when none is configured
pub const DEFAULT_DEPTH: usize = 2;

// ============================================================================
// HEURISTIC KINDS
// ============================================================================

/// Selectable value heuristic
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueKind {
    Connected,
    ShortestPath,
    #[default]
    TwoDistance,
    MaxFlow,
    Resistance,
    YReduction,
}

impl ValueKind {
    pub const ALL: [ValueKind; 6] = [
        ValueKind::Connected,
        ValueKind::ShortestPath,
        ValueKind::TwoDistance,
        ValueKind::MaxFlow,
        ValueKind::Resistance,
        ValueKind::YReduction,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Connected => "connected",
            ValueKind::ShortestPath => "shortest-path",
            ValueKind::TwoDistance => "two-distance",
            ValueKind::MaxFlow => "max-flow",
            ValueKind::Resistance => "resistance",
            ValueKind::YReduction => "y-reduction",
        }
    }

    pub fn build(self) -> Box<dyn ValueHeuristic> {
        match self {
            ValueKind::Connected => Box::new(ConnectedValue),
            ValueKind::ShortestPath => Box::new(ShortestPathValue),
            ValueKind::TwoDistance => Box::new(TwoDistanceValue),
            ValueKind::MaxFlow => Box::new(MaxFlowValue::new(EdmondsKarp)),
            ValueKind::Resistance => Box::new(ResistanceValue::new(LaplacianSolver)),
            ValueKind::YReduction => Box::new(YReductionValue),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueKind {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase().replace('_', "-");
        ValueKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or(HexError::Unknown {
                kind: "value heuristic",
                name,
            })
    }
}

/// Selectable move orderer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderKind {
    #[default]
    Random,
    Charge,
}

impl OrderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderKind::Random => "random",
            OrderKind::Charge => "charge",
        }
    }

    /// Orderer for a board of `board_size`; `seed` fixes the random shuffle
    pub fn build(self, board_size: usize, seed: Option<u64>) -> Box<dyn OrderHeuristic> {
        match self {
            OrderKind::Random => Box::new(seed.map_or_else(RandomOrder::new, RandomOrder::with_seed)),
            OrderKind::Charge => Box::new(ChargeOrder::new(board_size)),
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderKind {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(OrderKind::Random),
            "charge" => Ok(OrderKind::Charge),
            other => Err(HexError::Unknown {
                kind: "order heuristic",
                name: other.to_string(),
            }),
        }
    }
}

// ============================================================================
// AI CONFIG
// ============================================================================

/// Computer player settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Leaf evaluator
    pub value: ValueKind,
    /// Child ordering
    pub order: OrderKind,
    /// Search depth (None = search to the end of the game)
    pub max_depth: Option<usize>,
    pub algorithm: Algorithm,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            value: ValueKind::default(),
            order: OrderKind::default(),
            max_depth: Some(DEFAULT_DEPTH),
            algorithm: Algorithm::default(),
            seed: None,
        }
    }
}

impl AiConfig {
    pub fn new(value: ValueKind, order: OrderKind) -> Self {
        Self {
            value,
            order,
            ..Default::default()
        }
    }

    /// Set search depth; None searches to the end of the game
    pub fn with_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse from JSON text
    pub fn from_json(text: &str) -> Result<Self, HexError> {
        let config: AiConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// A depth of 0 never expands the root, so the player could not move
    pub fn validate(&self) -> Result<(), HexError> {
        match self.max_depth {
            Some(0) => Err(HexError::ZeroDepth),
            _ => Ok(()),
        }
    }

    /// Instantiate the player for a board of `board_size`
    pub fn build(&self, board_size: usize) -> HexAi {
        if self.max_depth.is_none() && board_size > 4 {
            tracing::warn!(board_size, "unbounded search depth on a large board");
        }
        HexAi::new(
            self.max_depth,
            self.algorithm,
            self.value.build(),
            self.order.build(board_size, self.seed),
        )
    }
}

impl fmt::Display for AiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ", self.value, self.order)?;
        match self.max_depth {
            Some(depth) => write!(f, "{} depth {}", self.algorithm, depth),
            None => write!(f, "{} unbounded", self.algorithm),
        }
    }
}
