//! Match play - multiple games between two computer players
//!
//! Level 2 - Phase-level implementation

use hexai_core::{AiConfig, Player};
use rayon::prelude::*;
use serde::Serialize;

use crate::config::MatchConfig;
use crate::game_runner::{GameOutcome, GameRunner};
use crate::stats::{mann_whitney_less, mean, std_dev, MannWhitney, Verdict};

/// Per-side totals of a match
#[derive(Clone, Debug, Default, Serialize)]
pub struct SideSummary {
    pub wins: usize,
    /// Wins in trials this side started
    pub wins_as_starter: usize,
    /// Mean over trials of the per-trial mean move time (seconds)
    pub mean_move_time: f64,
    /// Mean over trials of the per-trial move time standard deviation
    pub std_move_time: f64,
    /// Per-trial mean move times, in trial order
    pub trial_means: Vec<f64>,
}

/// Result of a match (multiple games)
#[derive(Clone, Debug, Serialize)]
pub struct MatchResult {
    pub board_size: usize,
    pub trials: usize,
    pub blue_config: AiConfig,
    pub red_config: AiConfig,
    pub blue: SideSummary,
    pub red: SideSummary,
    /// Games that ended without a connection
    pub unfinished: usize,
    /// Average number of moves per game
    pub avg_game_length: f64,
    /// Test of "Blue moves faster than Red" on the per-trial mean move times
    pub mann_whitney: Option<MannWhitney>,
    pub verdict: Option<Verdict>,
    /// Individual game outcomes
    pub outcomes: Vec<GameOutcome>,
}

impl MatchResult {
    pub fn side(&self, player: Player) -> &SideSummary {
        match player {
            Player::Blue => &self.blue,
            Player::Red => &self.red,
        }
    }

    /// Fraction of trials won by `player`
    pub fn win_rate(&self, player: Player) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.side(player).wins as f64 / self.trials as f64
        }
    }
}

/// Play a match (Level 2 phase)
///
/// Trials alternate the starting player, beginning with
/// `config.first_player`.
pub fn play_match(config: &MatchConfig) -> anyhow::Result<MatchResult> {
    play_match_with(config, &|_, _| {})
}

/// Play a match, calling `on_trial` after every finished game
pub fn play_match_with(
    config: &MatchConfig,
    on_trial: &(dyn Fn(usize, &GameOutcome) + Sync),
) -> anyhow::Result<MatchResult> {
    config.validate()?;
    tracing::info!(
        board_size = config.board_size,
        trials = config.trials,
        blue = %config.blue,
        red = %config.red,
        parallel = config.parallel,
        "starting match"
    );

    let trials = prepare_trials(config);
    let run = |trial: &Trial| {
        let outcome = play_trial(config, trial)?;
        on_trial(trial.index, &outcome);
        Ok::<_, anyhow::Error>(outcome)
    };
    let outcomes = if config.parallel {
        trials.par_iter().map(run).collect::<anyhow::Result<Vec<_>>>()?
    } else {
        trials.iter().map(run).collect::<anyhow::Result<Vec<_>>>()?
    };

    Ok(aggregate_results(config, outcomes))
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Configuration for a single game in a match
#[derive(Clone, Copy, Debug)]
struct Trial {
    index: usize,
    first_player: Player,
}

/// Alternate the starting player across trials
fn prepare_trials(config: &MatchConfig) -> Vec<Trial> {
    (0..config.trials)
        .map(|index| Trial {
            index,
            first_player: if index % 2 == 0 {
                config.first_player
            } else {
                config.first_player.opponent()
            },
        })
        .collect()
}

/// Seed of one player in one trial; distinct per trial and per side
fn trial_seed(match_seed: Option<u64>, player: &AiConfig, offset: u64) -> Option<u64> {
    match_seed.or(player.seed).map(|seed| seed.wrapping_add(offset))
}

/// Play a single game with freshly built players
fn play_trial(config: &MatchConfig, trial: &Trial) -> anyhow::Result<GameOutcome> {
    let offset = 2 * trial.index as u64;
    let mut blue_config = config.blue.clone();
    blue_config.seed = trial_seed(config.seed, &config.blue, offset);
    let mut red_config = config.red.clone();
    red_config.seed = trial_seed(config.seed, &config.red, offset + 1);

    let mut blue = blue_config.build(config.board_size);
    let mut red = red_config.build(config.board_size);
    let outcome = GameRunner::new(config.board_size).play_game(&mut blue, &mut red, trial.first_player)?;

    tracing::info!(
        trial = trial.index + 1,
        of = config.trials,
        starter = %trial.first_player,
        winner = ?outcome.winner,
        moves = outcome.length(),
        "trial finished"
    );
    Ok(outcome)
}

fn summarize_side(outcomes: &[GameOutcome], player: Player) -> SideSummary {
    let trial_means: Vec<f64> = outcomes
        .iter()
        .map(|o| mean(o.move_times(player)))
        .filter(|m| !m.is_nan())
        .collect();
    let trial_stds: Vec<f64> = outcomes
        .iter()
        .map(|o| std_dev(o.move_times(player)))
        .filter(|s| !s.is_nan())
        .collect();

    SideSummary {
        wins: outcomes.iter().filter(|o| o.winner == Some(player)).count(),
        wins_as_starter: outcomes
            .iter()
            .filter(|o| o.first_player == player && o.starter_won())
            .count(),
        mean_move_time: if trial_means.is_empty() { 0.0 } else { mean(&trial_means) },
        std_move_time: if trial_stds.is_empty() { 0.0 } else { mean(&trial_stds) },
        trial_means,
    }
}

/// Aggregate game outcomes into a match result
fn aggregate_results(config: &MatchConfig, outcomes: Vec<GameOutcome>) -> MatchResult {
    let blue = summarize_side(&outcomes, Player::Blue);
    let red = summarize_side(&outcomes, Player::Red);
    let mann_whitney = mann_whitney_less(&blue.trial_means, &red.trial_means);

    let lengths: Vec<f64> = outcomes.iter().map(|o| o.length() as f64).collect();

    MatchResult {
        board_size: config.board_size,
        trials: outcomes.len(),
        blue_config: config.blue.clone(),
        red_config: config.red.clone(),
        unfinished: outcomes.iter().filter(|o| o.winner.is_none()).count(),
        avg_game_length: if lengths.is_empty() { 0.0 } else { mean(&lengths) },
        verdict: mann_whitney.map(|mw| mw.verdict()),
        mann_whitney,
        blue,
        red,
        outcomes,
    }
}
