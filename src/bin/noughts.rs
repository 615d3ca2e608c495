//! noughts CLI - training and analysis toolkit for tic-tac-toe agents
//!
//! This CLI provides a unified interface for:
//! - Training tabular agents (SARSA, Monte-Carlo control) through self-play
//! - Evaluating learned policies against baseline opponents
//! - Querying the exact minimax solver for any position

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "noughts")]
#[command(version, about = "Search and tabular RL for tic-tac-toe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a tabular agent through self-play
    Train(noughts::cli::commands::train::TrainArgs),

    /// Evaluate a trained policy against an opponent
    Evaluate(noughts::cli::commands::evaluate::EvaluateArgs),

    /// Compute the optimal move for a position
    Solve(noughts::cli::commands::solve::SolveArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => noughts::cli::commands::train::execute(args),
        Commands::Evaluate(args) => noughts::cli::commands::evaluate::execute(args),
        Commands::Solve(args) => noughts::cli::commands::solve::execute(args),
    }
}
