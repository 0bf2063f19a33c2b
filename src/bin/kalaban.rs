//! Kalaban CLI - play tic-tac-toe against the engine, evaluate it, and inspect
//! its value store

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kalaban")]
#[command(version, about = "Tic-tac-toe decision engine", long_about = None)]
struct Cli {
    /// Log level when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game in the terminal
    Play(kalaban::cli::commands::play::PlayArgs),

    /// Evaluate the engine against a scripted opponent
    Evaluate(kalaban::cli::commands::evaluate::EvaluateArgs),

    /// Show the contents of a saved value store
    Stats(kalaban::cli::commands::stats::StatsArgs),
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

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
        Commands::Play(args) => kalaban::cli::commands::play::execute(args),
        Commands::Evaluate(args) => kalaban::cli::commands::evaluate::execute(args),
        Commands::Stats(args) => kalaban::cli::commands::stats::execute(args),
    }
}
