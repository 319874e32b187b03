//! Eval command - score a position with every heuristic
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_position(), evaluate(), report()
//! - Level 4: move list parsing

use anyhow::{Context, Result};
use clap::Args;

use hexai_core::{BoardState, ChargeOrder, Move, OrderHeuristic, Player, ValueKind};

use crate::play_cmd::render_board;

#[derive(Args)]
pub struct EvalArgs {
    /// Board edge length
    #[arg(long, default_value = "11")]
    pub size: usize,

    /// Moves to play from the empty board, e.g. "5,5;4,6"
    #[arg(long, default_value = "")]
    pub moves: String,

    /// Side that played the first move
    #[arg(long, default_value = "blue")]
    pub first: Player,

    /// Number of charge-ordered moves to list
    #[arg(long, default_value = "5")]
    pub top: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Scores of one position
#[derive(Debug, serde::Serialize)]
struct Evaluation {
    to_move: Player,
    winner: Option<Player>,
    /// (heuristic name, score); positive favors Blue
    values: Vec<(&'static str, f64)>,
    /// Charge ordering's first moves with their curvature score
    top_moves: Vec<(Move, f64)>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: EvalArgs) -> Result<()> {
    let moves = parse_moves(&args.moves)?;
    let state = build_position(args.size, args.first, &moves)?;

    tracing::info!(size = args.size, moves = moves.len(), "evaluating position");

    let evaluation = evaluate(&state, args.top);
    report(&state, &evaluation, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_position(size: usize, first: Player, moves: &[Move]) -> Result<BoardState> {
    let mut state = BoardState::new(size, first)?;
    for (i, &mv) in moves.iter().enumerate() {
        state
            .try_play(mv)
            .with_context(|| format!("Move {} ({}) cannot be played", i + 1, mv))?;
    }
    Ok(state)
}

fn evaluate(state: &BoardState, top: usize) -> Evaluation {
    let values = ValueKind::ALL
        .into_iter()
        .map(|kind| (kind.as_str(), kind.build().compute(state)))
        .collect();

    let mut charge = ChargeOrder::new(state.size());
    let scores = charge.cell_scores(state);
    let top_moves = charge
        .order(state, state.available_moves())
        .into_iter()
        .take(top)
        .map(|mv| (mv, scores[mv.row][mv.col]))
        .collect();

    Evaluation {
        to_move: state.turn(),
        winner: state.check_winner(),
        values,
        top_moves,
    }
}

fn report(state: &BoardState, evaluation: &Evaluation, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(evaluation).context("Failed to serialize evaluation")?;
        println!("{}", text);
        return Ok(());
    }

    println!("{}", render_board(state));
    match evaluation.winner {
        Some(winner) => println!("Winner: {}", winner),
        None => println!("To move: {}", evaluation.to_move),
    }

    println!("\n{:<16} {:>12}", "Heuristic", "Score");
    println!("{}", "-".repeat(29));
    for (name, score) in &evaluation.values {
        println!("{:<16} {:>12.4}", name, score);
    }

    if !evaluation.top_moves.is_empty() {
        println!("\nCharge ordering:");
        for (rank, (mv, score)) in evaluation.top_moves.iter().enumerate() {
            println!("{:>3}. {:<10} {:>10.4}", rank + 1, mv.to_string(), score);
        }
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Parse `"r,c;r,c;..."`; blank entries are skipped
fn parse_moves(text: &str) -> Result<Vec<Move>> {
    text.split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<Move>().with_context(|| format!("Invalid move '{}'", part)))
        .collect()
}
