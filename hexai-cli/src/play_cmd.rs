//! Play command - one game between two computer players
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_players(), play_game(), report_game()
//! - Level 3: print_json_game(), print_text_game()
//! - Level 4: board rendering

use anyhow::{Context, Result};
use clap::Args;

use hexai_core::{AiConfig, Algorithm, BoardState, HexAi, Move, OrderKind, Player, ValueKind};
use hexai_tournament::{GameOutcome, GameRunner};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Board edge length
    #[arg(long, default_value = "11")]
    pub size: usize,

    /// Value heuristic of the Blue player (left-right)
    #[arg(long, default_value = "two-distance")]
    pub blue_value: ValueKind,

    /// Move ordering of the Blue player
    #[arg(long, default_value = "random")]
    pub blue_order: OrderKind,

    /// Value heuristic of the Red player (top-bottom)
    #[arg(long, default_value = "two-distance")]
    pub red_value: ValueKind,

    /// Move ordering of the Red player
    #[arg(long, default_value = "random")]
    pub red_order: OrderKind,

    /// Search depth for both players (at least 1)
    #[arg(long, default_value = "2", value_parser = parse_depth)]
    pub depth: usize,

    /// Search algorithm for both players
    #[arg(long, default_value = "alpha-beta")]
    pub algorithm: Algorithm,

    /// Side that moves first
    #[arg(long, default_value = "blue")]
    pub first: Player,

    /// Output the game as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Build both players
/// 2. Play the game
/// 3. Report the outcome
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let (blue_config, red_config) = player_configs(&args, seed);
    blue_config.validate().context("Invalid blue player")?;
    red_config.validate().context("Invalid red player")?;

    tracing::info!(
        size = args.size,
        blue = %blue_config,
        red = %red_config,
        first = %args.first,
        "starting game"
    );

    let (mut blue, mut red) = build_players(&blue_config, &red_config, args.size);
    let outcome = play_game(&args, &mut blue, &mut red)?;

    report_game(&outcome, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Player settings from the flags; Red's seed is offset so the sides differ
fn player_configs(args: &PlayArgs, seed: Option<u64>) -> (AiConfig, AiConfig) {
    let configure = |value, order, seed: Option<u64>| {
        let config = AiConfig::new(value, order)
            .with_depth(Some(args.depth))
            .with_algorithm(args.algorithm);
        match seed {
            Some(s) => config.with_seed(s),
            None => config,
        }
    };

    (
        configure(args.blue_value, args.blue_order, seed),
        configure(args.red_value, args.red_order, seed.map(|s| s.wrapping_add(1))),
    )
}

fn build_players(blue: &AiConfig, red: &AiConfig, size: usize) -> (HexAi, HexAi) {
    (blue.build(size), red.build(size))
}

fn play_game(args: &PlayArgs, blue: &mut HexAi, red: &mut HexAi) -> Result<GameOutcome> {
    let outcome = GameRunner::new(args.size)
        .play_game(blue, red, args.first)
        .with_context(|| format!("Failed to play a game on a {0}x{0} board", args.size))?;

    for (turn, mv) in outcome.moves.iter().enumerate() {
        tracing::info!(turn = turn + 1, player = %mover(args.first, turn), %mv, "move");
    }

    Ok(outcome)
}

fn report_game(outcome: &GameOutcome, args: &PlayArgs) -> Result<()> {
    if args.json {
        print_json_game(outcome)
    } else {
        print_text_game(outcome, args)
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn print_json_game(outcome: &GameOutcome) -> Result<()> {
    let json = serde_json::to_string_pretty(outcome).context("Failed to serialize game")?;
    println!("{}", json);
    Ok(())
}

fn print_text_game(outcome: &GameOutcome, args: &PlayArgs) -> Result<()> {
    let state = replay(args.size, args.first, &outcome.moves)?;

    println!("\n=== Game Result ===");
    match outcome.winner {
        Some(winner) => println!("Winner: {} after {} moves", winner, outcome.length()),
        None => println!("No winner after {} moves", outcome.length()),
    }
    println!(
        "Blue time:   {:.3}s over {} moves",
        outcome.blue_move_times.iter().sum::<f64>(),
        outcome.blue_move_times.len()
    );
    println!(
        "Red time:    {:.3}s over {} moves",
        outcome.red_move_times.iter().sum::<f64>(),
        outcome.red_move_times.len()
    );

    let moves: Vec<String> = outcome.moves.iter().map(|mv| format!("{},{}", mv.row, mv.col)).collect();
    println!("Moves: {}", moves.join(";"));
    println!("\n{}", render_board(&state));
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Clap parser for `--depth`: a depth of 0 would never produce a move
pub(crate) fn parse_depth(text: &str) -> Result<usize, String> {
    match text.trim().parse::<usize>() {
        Ok(0) => Err("depth must be at least 1".to_string()),
        Ok(depth) => Ok(depth),
        Err(e) => Err(e.to_string()),
    }
}

/// Side that made move number `turn` (0-based)
fn mover(first: Player, turn: usize) -> Player {
    if turn % 2 == 0 {
        first
    } else {
        first.opponent()
    }
}

/// Rebuild the final position from a move list
fn replay(size: usize, first: Player, moves: &[Move]) -> Result<BoardState> {
    let mut state = BoardState::new(size, first)?;
    for &mv in moves {
        state.try_play(mv)?;
    }
    Ok(state)
}

/// Rhombic text rendering: one row per line, shifted right as rows go down
pub(crate) fn render_board(state: &BoardState) -> String {
    let n = state.size();
    let mut out = String::new();
    out.push_str(&format!("  {}\n", (0..n).map(|c| format!("{:<2}", c % 10)).collect::<String>()));
    for row in 0..n {
        out.push_str(&" ".repeat(row));
        out.push_str(&format!("{:>2} ", row));
        for col in 0..n {
            let symbol = match state.get(Move::new(row, col)) {
                Some(Player::Blue) => 'B',
                Some(Player::Red) => 'R',
                None => '.',
            };
            out.push(symbol);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct PlayCli {
        #[command(flatten)]
        args: PlayArgs,
    }

    #[test]
    fn test_depth_flag_rejects_zero() {
        assert_eq!(parse_depth("3"), Ok(3));
        assert!(parse_depth("0").is_err());
        assert!(parse_depth("deep").is_err());

        assert!(PlayCli::try_parse_from(["hexai", "--depth", "0"]).is_err());
        let cli = PlayCli::try_parse_from(["hexai", "--depth", "1"]).unwrap();
        assert_eq!(cli.args.depth, 1);
        assert_eq!(PlayCli::try_parse_from(["hexai"]).unwrap().args.depth, 2);
    }

    #[test]
    fn test_mover_alternates() {
        assert_eq!(mover(Player::Red, 0), Player::Red);
        assert_eq!(mover(Player::Red, 1), Player::Blue);
        assert_eq!(mover(Player::Blue, 4), Player::Blue);
    }

    #[test]
    fn test_render_board() {
        let mut state = BoardState::new(3, Player::Blue).unwrap();
        state.play(Move::new(0, 1));
        state.play(Move::new(2, 0));

        let text = render_board(&state);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], " 0 . B . ");
        assert_eq!(lines[3], "   2 R . . ");
    }

    #[test]
    fn test_replay_rejects_occupied_cell() {
        let moves = [Move::new(1, 1), Move::new(1, 1)];
        assert!(replay(3, Player::Blue, &moves).is_err());
        assert_eq!(replay(3, Player::Blue, &moves[..1]).unwrap().history(), &moves[..1]);
    }
}
