//! HexAI CLI - Command-line interface
//!
//! Commands:
//! - play: One game between two computer players
//! - bench: A full match with timing statistics
//! - eval: Score a position with every heuristic

mod bench;
mod eval_cmd;
mod play_cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hexai")]
#[command(about = "Hex adversarial search engine")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game between two computer players
    Play(play_cmd::PlayArgs),
    /// Run a match and compare move latencies
    Bench(bench::BenchArgs),
    /// Evaluate a position with every value heuristic
    Eval(eval_cmd::EvalArgs),
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Bench(args) => bench::run(args, cli.seed),
        Commands::Eval(args) => eval_cmd::run(args),
    }
}
