//! oxo CLI - train, evaluate, and play tic-tac-toe strategies

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "oxo")]
#[command(version, about = "Tic-tac-toe strategy engine with tabular Q-learning", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train strategies against each other
    Train(oxo::cli::commands::train::TrainArgs),

    /// Evaluate two strategies head-to-head
    Evaluate(oxo::cli::commands::evaluate::EvaluateArgs),

    /// Play an interactive game
    Play(oxo::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => oxo::cli::commands::train::execute(args),
        Commands::Evaluate(args) => oxo::cli::commands::evaluate::execute(args),
        Commands::Play(args) => oxo::cli::commands::play::execute(args),
    }
}
