//! Evaluate command - play a trained policy against a baseline opponent

use std::{fs::File, path::PathBuf};

use anyhow::Result;
use clap::Parser;

use crate::{
    adapters::MsgPackRepository,
    cli::commands::train::parse_opponent,
    learning::ValueTable,
    pipeline::evaluate,
    ports::PolicyRepository,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained policy")]
pub struct EvaluateArgs {
    /// Path to a saved policy snapshot
    pub policy: PathBuf,

    /// Opponent to evaluate against (random or perfect)
    #[arg(long, short = 'o', default_value = "perfect")]
    pub opponent: String,

    /// Evaluation games per seat
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Random seed for the opponent
    #[arg(long)]
    pub seed: Option<u64>,

    /// Export the evaluation report as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let opponent_kind = parse_opponent(&args.opponent)?;

    // Absent snapshots degrade to the empty table (all-zero vectors): the
    // greedy policy then just plays the first legal move.
    let table: ValueTable = match MsgPackRepository.load(&args.policy) {
        Ok(saved) => {
            println!(
                "Loaded {} policy: {} states, {} epochs trained",
                saved.algorithm.label(),
                saved.values.len(),
                saved.metadata.epochs_trained
            );
            saved.values
        }
        Err(err) => {
            eprintln!(
                "Warning: could not load snapshot {} ({err}); evaluating an empty table",
                args.policy.display()
            );
            ValueTable::new()
        }
    };

    let mut opponent = opponent_kind.build(args.seed);
    println!(
        "Playing {} games per seat vs {}...",
        args.games,
        opponent.name()
    );

    let report = evaluate(&table, opponent.as_mut(), args.games)?;

    println!("\n=== Evaluation Results ===");
    for (seat, tally) in [("first", report.as_first), ("second", report.as_second)] {
        println!(
            "As {seat} mover: {} wins ({:.1}%), {} draws ({:.1}%), {} losses ({:.1}%)",
            tally.wins,
            tally.win_rate() * 100.0,
            tally.draws,
            tally.draw_rate() * 100.0,
            tally.losses,
            tally.loss_rate() * 100.0,
        );
    }

    if let Some(ref export_path) = args.export {
        let file = File::create(export_path)?;
        serde_json::to_writer_pretty(file, &report)?;
        println!("Report exported to {}", export_path.display());
    }

    Ok(())
}
