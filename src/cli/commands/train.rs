//! Train command - self-play training for SARSA and Monte-Carlo control

use std::{fs::File, path::PathBuf};

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    adapters::{CsvMetricsWriter, MsgPackRepository},
    learning::{
        Algorithm, MonteCarloTrainer, SarsaTrainer, SavedPolicy, TrainerConfig, TrainingMetadata,
    },
    pipeline::{OpponentKind, ProgressObserver, SessionConfig, TrainingSession},
    ports::{PolicyRepository, Trainer},
};

#[derive(Parser, Debug)]
#[command(about = "Train a tabular agent through self-play")]
pub struct TrainArgs {
    /// Learning rule to train with
    #[arg(value_enum)]
    pub algorithm: AlgorithmArg,

    /// Number of self-play epochs (episodes)
    #[arg(long, short = 'e', default_value_t = 20_000)]
    pub epochs: usize,

    /// Learning rate α (SARSA only)
    #[arg(long, default_value_t = 0.1)]
    pub alpha: f64,

    /// Discount factor γ
    #[arg(long, default_value_t = 0.99)]
    pub gamma: f64,

    /// Initial exploration rate
    #[arg(long, default_value_t = 1.0)]
    pub epsilon: f64,

    /// Multiplicative epsilon decay per epoch
    #[arg(long, default_value_t = 0.9999885)]
    pub epsilon_decay: f64,

    /// Exploration floor
    #[arg(long, default_value_t = 0.1)]
    pub min_epsilon: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Opponent for evaluation checkpoints (random or perfect)
    #[arg(long, short = 'o', default_value = "random")]
    pub opponent: String,

    /// Evaluate every this many epochs (0 disables)
    #[arg(long, default_value_t = 100)]
    pub eval_interval: usize,

    /// Evaluation games per seat
    #[arg(long, default_value_t = 100)]
    pub eval_games: usize,

    /// Checkpoint the tables every this many epochs (0 disables)
    #[arg(long, default_value_t = 1000)]
    pub checkpoint_interval: usize,

    /// Output file for the trained policy (also the checkpoint target)
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Resume from an existing policy snapshot
    #[arg(long)]
    pub resume: Option<PathBuf>,

    /// Write per-checkpoint evaluation rates as CSV
    #[arg(long)]
    pub metrics_csv: Option<PathBuf>,

    /// Write a JSON training summary
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AlgorithmArg {
    /// On-policy SARSA (TD control)
    Sarsa,
    /// Monte-Carlo control (incremental-mean returns)
    Mc,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Sarsa => Algorithm::Sarsa,
            AlgorithmArg::Mc => Algorithm::MonteCarlo,
        }
    }
}

pub(crate) fn parse_opponent(value: &str) -> Result<OpponentKind> {
    match value.trim().to_ascii_lowercase().as_str() {
        "random" => Ok(OpponentKind::Random),
        "perfect" | "minimax" | "optimal" => Ok(OpponentKind::Perfect),
        other => Err(anyhow!(
            "Unknown opponent '{other}'. Use 'random' or 'perfect'"
        )),
    }
}

#[derive(Debug, Serialize)]
struct SummaryFile {
    algorithm: &'static str,
    epochs: usize,
    prior_epochs: usize,
    final_epsilon: f64,
    states_learned: usize,
    evaluations: usize,
    opponent: &'static str,
    seed: Option<u64>,
    alpha: f64,
    gamma: f64,
    last_evaluation: Option<LastEvaluation>,
}

#[derive(Debug, Serialize)]
struct LastEvaluation {
    epoch: usize,
    first_win_rate: f64,
    first_draw_rate: f64,
    first_loss_rate: f64,
    second_win_rate: f64,
    second_draw_rate: f64,
    second_loss_rate: f64,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let algorithm: Algorithm = args.algorithm.into();
    let opponent = parse_opponent(&args.opponent)?;

    let trainer_config = TrainerConfig {
        alpha: args.alpha,
        gamma: args.gamma,
        epsilon: args.epsilon,
        epsilon_decay: args.epsilon_decay,
        min_epsilon: args.min_epsilon,
        seed: args.seed,
    };

    // A missing or unreadable snapshot is not fatal at startup: the table
    // contract treats absent knowledge as all-zero vectors.
    let mut prior_epochs = 0;
    let resumed = match &args.resume {
        Some(path) => match MsgPackRepository.load(path) {
            Ok(saved) => {
                if saved.algorithm != algorithm {
                    return Err(anyhow!(
                        "snapshot {} was trained with {}, not {}",
                        path.display(),
                        saved.algorithm.label(),
                        algorithm.label()
                    ));
                }
                prior_epochs = saved.metadata.epochs_trained;
                println!(
                    "Resuming from {} ({} states, {} epochs trained)",
                    path.display(),
                    saved.values.len(),
                    prior_epochs
                );
                Some(saved)
            }
            Err(err) => {
                eprintln!(
                    "Warning: could not load snapshot {} ({err}); starting with an empty table",
                    path.display()
                );
                None
            }
        },
        None => None,
    };

    let mut trainer: Box<dyn Trainer> = match algorithm {
        Algorithm::Sarsa => {
            let mut trainer = SarsaTrainer::new(&trainer_config);
            if let Some(saved) = resumed {
                trainer = trainer.with_table(saved.values).with_epsilon(saved.epsilon);
            }
            Box::new(trainer)
        }
        Algorithm::MonteCarlo => {
            let mut trainer = MonteCarloTrainer::new(&trainer_config);
            if let Some(saved) = resumed {
                trainer = trainer
                    .with_tables(saved.values, saved.visits)
                    .with_epsilon(saved.epsilon);
            }
            Box::new(trainer)
        }
    };

    println!("=== Training: {} ===", trainer.name());
    println!("Epochs: {}", args.epochs);
    println!("Evaluation opponent: {}", opponent.label());
    if let Some(seed) = args.seed {
        println!("Seed: {seed}");
    }

    let session_config = SessionConfig {
        epochs: args.epochs,
        eval_interval: args.eval_interval,
        eval_games: args.eval_games,
        opponent,
        checkpoint_interval: args.checkpoint_interval,
        checkpoint_path: args.output.clone(),
        seed: args.seed,
    };

    let mut session = TrainingSession::new(session_config);
    if args.progress {
        session = session.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(ref csv_path) = args.metrics_csv {
        session = session.with_observer(Box::new(CsvMetricsWriter::new(csv_path)?));
    }
    if args.output.is_some() {
        session = session.with_repository(Box::new(MsgPackRepository::new()));
    }

    let result = session.run(trainer.as_mut())?;

    println!("\n=== Training Complete ===");
    println!("Epochs: {}", result.epochs);
    println!("States learned: {}", result.states_learned);
    println!("Final epsilon: {:.4}", result.final_epsilon);
    if let Some((epoch, report)) = result.history.last() {
        println!(
            "Last evaluation (epoch {epoch}): as first W/D/L {:.1}%/{:.1}%/{:.1}%, as second {:.1}%/{:.1}%/{:.1}%",
            report.as_first.win_rate() * 100.0,
            report.as_first.draw_rate() * 100.0,
            report.as_first.loss_rate() * 100.0,
            report.as_second.win_rate() * 100.0,
            report.as_second.draw_rate() * 100.0,
            report.as_second.loss_rate() * 100.0,
        );
    }

    if let Some(ref output_path) = args.output {
        let snapshot = SavedPolicy::capture(
            trainer.as_ref(),
            TrainingMetadata {
                epochs_trained: prior_epochs + result.epochs,
                seed: args.seed,
            },
        );
        MsgPackRepository.save(&snapshot, output_path)?;
        println!("Policy saved to: {}", output_path.display());
    }

    if let Some(ref summary_path) = args.summary {
        let summary = SummaryFile {
            algorithm: algorithm.label(),
            epochs: result.epochs,
            prior_epochs,
            final_epsilon: result.final_epsilon,
            states_learned: result.states_learned,
            evaluations: result.history.len(),
            opponent: opponent.label(),
            seed: args.seed,
            alpha: args.alpha,
            gamma: args.gamma,
            last_evaluation: result.history.last().map(|(epoch, report)| LastEvaluation {
                epoch: *epoch,
                first_win_rate: report.as_first.win_rate(),
                first_draw_rate: report.as_first.draw_rate(),
                first_loss_rate: report.as_first.loss_rate(),
                second_win_rate: report.as_second.win_rate(),
                second_draw_rate: report.as_second.draw_rate(),
                second_loss_rate: report.as_second.loss_rate(),
            }),
        };

        let file = File::create(summary_path)?;
        to_writer_pretty(file, &summary)?;
        println!("Summary written to {}", summary_path.display());
    }

    Ok(())
}
