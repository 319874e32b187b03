//! Bench command - a full match between two computer players
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_config(), run_match(), report_results()
//! - Level 3: apply_overrides(), print_json_results(), print_text_results()
//! - Level 4: progress bar, formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use hexai_core::{Algorithm, OrderKind, Player, ValueKind};
use hexai_tournament::{play_match_with, GameOutcome, MatchConfig, MatchResult, SideSummary};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BenchArgs {
    /// Match configuration JSON file; flags below override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of games to play (alternating the starting side)
    #[arg(long)]
    pub trials: Option<usize>,

    /// Board edge length
    #[arg(long)]
    pub size: Option<usize>,

    #[arg(long)]
    pub blue_value: Option<ValueKind>,

    #[arg(long)]
    pub blue_order: Option<OrderKind>,

    #[arg(long)]
    pub red_value: Option<ValueKind>,

    #[arg(long)]
    pub red_order: Option<OrderKind>,

    /// Search depth for both players (at least 1)
    #[arg(long, value_parser = crate::play_cmd::parse_depth)]
    pub depth: Option<usize>,

    /// Search algorithm for both players
    #[arg(long)]
    pub algorithm: Option<Algorithm>,

    /// Side that starts the first game
    #[arg(long)]
    pub first: Option<Player>,

    /// Play games on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Write the effective configuration to this file
    #[arg(long, value_name = "FILE")]
    pub save_config: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run bench command
///
/// 1. Load the match configuration and apply flag overrides
/// 2. Play the match with a progress bar
/// 3. Report results
pub fn run(args: BenchArgs, seed: Option<u64>) -> Result<()> {
    let config = load_config(&args, seed)?;

    if let Some(path) = &args.save_config {
        config.save(path)?;
        tracing::info!(path = %path.display(), "saved match config");
    }

    tracing::info!(
        "Starting bench: {} vs {} ({} trials, {}x{})",
        config.blue,
        config.red,
        config.trials,
        config.board_size,
        config.board_size
    );

    let started = Utc::now();
    let result = run_match(&config, args.json)?;

    report_results(&result, started, &args);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_config(args: &BenchArgs, seed: Option<u64>) -> Result<MatchConfig> {
    let base = match &args.config {
        Some(path) => MatchConfig::load(path)
            .with_context(|| format!("Failed to load bench config: {}", path.display()))?,
        None => MatchConfig::default(),
    };
    let config = apply_overrides(base, args, seed);
    config.validate()?;
    Ok(config)
}

fn run_match(config: &MatchConfig, quiet: bool) -> Result<MatchResult> {
    let progress = progress_bar(config.trials as u64, quiet);
    let result = play_match_with(config, &|_: usize, outcome: &GameOutcome| {
        progress.set_message(match outcome.winner {
            Some(winner) => format!("last: {} won", winner),
            None => "last: unfinished".to_string(),
        });
        progress.inc(1);
    });
    progress.finish_and_clear();
    result
}

fn report_results(result: &MatchResult, started: DateTime<Utc>, args: &BenchArgs) {
    if args.json {
        print_json_results(result, started);
    } else {
        print_text_results(result, started);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Flags take precedence over the file; a global seed replaces the match seed
fn apply_overrides(mut config: MatchConfig, args: &BenchArgs, seed: Option<u64>) -> MatchConfig {
    if let Some(trials) = args.trials {
        config.trials = trials;
    }
    if let Some(size) = args.size {
        config.board_size = size;
    }
    if let Some(value) = args.blue_value {
        config.blue.value = value;
    }
    if let Some(order) = args.blue_order {
        config.blue.order = order;
    }
    if let Some(value) = args.red_value {
        config.red.value = value;
    }
    if let Some(order) = args.red_order {
        config.red.order = order;
    }
    if let Some(depth) = args.depth {
        config.blue.max_depth = Some(depth);
        config.red.max_depth = Some(depth);
    }
    if let Some(algorithm) = args.algorithm {
        config.blue.algorithm = algorithm;
        config.red.algorithm = algorithm;
    }
    if let Some(first) = args.first {
        config.first_player = first;
    }
    if args.parallel {
        config.parallel = true;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    config
}

fn print_json_results(result: &MatchResult, started: DateTime<Utc>) {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        timestamp: DateTime<Utc>,
        blue_win_rate: f64,
        red_win_rate: f64,
        #[serde(flatten)]
        result: &'a MatchResult,
    }

    let output = JsonOutput {
        timestamp: started,
        blue_win_rate: result.win_rate(Player::Blue),
        red_win_rate: result.win_rate(Player::Red),
        result,
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

fn print_text_results(result: &MatchResult, started: DateTime<Utc>) {
    println!("\n=== Bench Results ===");
    println!("Started:     {}", started.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("Board:       {0}x{0}", result.board_size);
    println!("Trials:      {}", result.trials);
    println!("Avg length:  {:.1} moves", result.avg_game_length);
    if result.unfinished > 0 {
        println!("Unfinished:  {}", result.unfinished);
    }
    println!();

    println!(
        "{:<6} {:<40} {:>6} {:>8} {:>9} {:>12} {:>12}",
        "Side", "Player", "Wins", "Win %", "Starter", "Mean/Move", "Std/Move"
    );
    println!("{}", "-".repeat(99));
    for (player, config) in [(Player::Blue, &result.blue_config), (Player::Red, &result.red_config)] {
        let side = result.side(player);
        println!(
            "{:<6} {:<40} {:>6} {:>7.1}% {:>9} {:>12} {:>12}",
            player.to_string(),
            config.to_string(),
            side.wins,
            result.win_rate(player) * 100.0,
            side.wins_as_starter,
            format_seconds(side.mean_move_time),
            format_seconds(side.std_move_time)
        );
    }

    println!();
    match (&result.mann_whitney, &result.verdict) {
        (Some(test), Some(verdict)) => println!(
            "Mann-Whitney U = {:.1}, p = {:.4} (blue faster than red?): {}",
            test.u, test.p_value, verdict
        ),
        _ => println!("Mann-Whitney test skipped: no timings"),
    }
    println!("{}", speed_summary(&result.blue, &result.red));
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Progress bar over trials; hidden when stdout carries JSON
fn progress_bar(trials: u64, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(trials);
    if let Ok(style) = ProgressStyle::with_template("[{elapsed_precise}] trials {bar:40.cyan/blue} {pos}/{len} {msg}") {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb
}

/// Human-readable duration from seconds
fn format_seconds(secs: f64) -> String {
    if secs >= 60.0 {
        format!("{}m {:.1}s", (secs / 60.0) as u64, secs % 60.0)
    } else if secs >= 1.0 {
        format!("{:.2}s", secs)
    } else if secs >= 1e-3 {
        format!("{:.1}ms", secs * 1e3)
    } else {
        format!("{:.1}us", secs * 1e6)
    }
}

/// Ratio of mean move times, e.g. "blue is 2.0x faster"
fn speed_summary(blue: &SideSummary, red: &SideSummary) -> String {
    let (b, r) = (blue.mean_move_time, red.mean_move_time);
    if b <= 0.0 || r <= 0.0 {
        "Speed ratio unavailable".to_string()
    } else if b <= r {
        format!("Blue is {:.1}x faster per move", r / b)
    } else {
        format!("Red is {:.1}x faster per move", b / r)
    }
}
