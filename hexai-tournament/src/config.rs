//! Configuration types for match play
//!
//! Level 4 - Utilities and configuration

use std::path::Path;

use anyhow::{bail, Context};
use hexai_core::{AiConfig, Player};
use serde::{Deserialize, Serialize};

/// Settings of a match between a Blue and a Red computer player
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Board edge length
    pub board_size: usize,
    /// Number of games to play
    pub trials: usize,
    /// Player connecting the left and right edges
    pub blue: AiConfig,
    /// Player connecting the top and bottom edges
    pub red: AiConfig,
    /// Side that starts the first trial; trials alternate from there
    pub first_player: Player,
    /// Run trials on the rayon thread pool
    pub parallel: bool,
    /// Base seed; in trial `i` Blue is seeded with `seed + 2i` and Red with
    /// `seed + 2i + 1`
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            board_size: 11,
            trials: 30,
            blue: AiConfig::default(),
            red: AiConfig::default(),
            first_player: Player::Blue,
            parallel: false,
            seed: None,
        }
    }
}

impl MatchConfig {
    pub fn new(board_size: usize, trials: usize) -> Self {
        Self {
            board_size,
            trials,
            ..Default::default()
        }
    }

    /// Set both players
    pub fn with_players(mut self, blue: AiConfig, red: AiConfig) -> Self {
        self.blue = blue;
        self.red = red;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read match config {}", path.display()))?;
        let config: MatchConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse match config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write match config {}", path.display()))?;
        Ok(())
    }

    /// Reject settings no game can be played with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.board_size < 2 {
            bail!("board size must be at least 2, got {}", self.board_size);
        }
        self.blue.validate().context("invalid blue player")?;
        self.red.validate().context("invalid red player")?;
        if self.parallel && self.trials > 1 {
            tracing::warn!("parallel trials share CPU time; per-move timings are not comparable");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexai_core::{OrderKind, ValueKind};

    #[test]
    fn test_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.board_size, 11);
        assert_eq!(config.trials, 30);
        assert_eq!(config.first_player, Player::Blue);
        assert!(!config.parallel);
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{
            "board_size": 7,
            "blue": {"value": "shortest-path", "order": "charge"},
            "first_player": "red"
        }"#;
        let config: MatchConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.board_size, 7);
        assert_eq!(config.trials, 30);
        assert_eq!(config.blue.value, ValueKind::ShortestPath);
        assert_eq!(config.blue.order, OrderKind::Charge);
        assert_eq!(config.red, AiConfig::default());
        assert_eq!(config.first_player, Player::Red);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("hexai-match-{}.json", std::process::id()));
        let config = MatchConfig::new(5, 4)
            .with_players(
                AiConfig::new(ValueKind::Resistance, OrderKind::Random),
                AiConfig::new(ValueKind::YReduction, OrderKind::Charge),
            )
            .with_seed(11);
        config.save(&path).unwrap();
        let loaded = MatchConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_errors_name_the_file() {
        let err = MatchConfig::load(Path::new("/nonexistent/match.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/match.json"));

        assert!(MatchConfig::new(1, 3).validate().is_err());
    }

    #[test]
    fn test_zero_depth_player_is_rejected() {
        let stuck = AiConfig::new(ValueKind::ShortestPath, OrderKind::Random).with_depth(Some(0));

        let blue = MatchConfig::new(4, 2).with_players(stuck.clone(), AiConfig::default());
        let err = blue.validate().unwrap_err();
        assert!(err.to_string().contains("blue"));

        let red = MatchConfig::new(4, 2).with_players(AiConfig::default(), stuck);
        let err = red.validate().unwrap_err();
        assert!(err.to_string().contains("red"));

        let json = r#"{"board_size": 4, "red": {"max_depth": 0}}"#;
        let config: MatchConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }
}
