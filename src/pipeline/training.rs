//! Training session: epochs, evaluation checkpoints, table snapshots

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    learning::{SavedPolicy, TrainingMetadata},
    pipeline::{
        evaluation::{EvalReport, evaluate},
        opponents::OpponentKind,
    },
    ports::{Observer, PolicyRepository, Trainer},
};

/// Configuration for a training session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Number of self-play episodes
    pub epochs: usize,

    /// Evaluate every this many epochs (0 disables evaluation)
    pub eval_interval: usize,

    /// Games per seat at each evaluation checkpoint
    pub eval_games: usize,

    /// Opponent used for evaluation games
    pub opponent: OpponentKind,

    /// Snapshot the tables every this many epochs (0 disables)
    pub checkpoint_interval: usize,

    /// Where checkpoints are written; `None` disables checkpointing
    pub checkpoint_path: Option<PathBuf>,

    /// Base seed for evaluation opponents
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            epochs: 20_000,
            eval_interval: 100,
            eval_games: 100,
            opponent: OpponentKind::Random,
            checkpoint_interval: 1000,
            checkpoint_path: None,
            seed: None,
        }
    }
}

/// Result of a completed training session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Episodes played
    pub epochs: usize,

    /// Evaluation reports in checkpoint order, keyed by epoch
    pub history: Vec<(usize, EvalReport)>,

    /// Exploration rate after the final decay
    pub final_epsilon: f64,

    /// Distinct states with learned vectors
    pub states_learned: usize,
}

/// Drives a trainer through self-play epochs with composable observers.
///
/// Checkpoints are taken strictly at epoch boundaries, never mid-episode,
/// so a snapshot can never contain a partially-updated table. A failed
/// checkpoint write is reported and skipped; training continues with the
/// in-memory tables.
pub struct TrainingSession {
    config: SessionConfig,
    observers: Vec<Box<dyn Observer>>,
    repository: Option<Box<dyn PolicyRepository>>,
}

impl TrainingSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
            repository: None,
        }
    }

    /// Add an observer to the session
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Attach the repository used for checkpoint snapshots
    pub fn with_repository(mut self, repository: Box<dyn PolicyRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Run the configured number of epochs with the given trainer
    pub fn run(&mut self, trainer: &mut dyn Trainer) -> Result<TrainingResult> {
        for observer in &mut self.observers {
            observer.on_training_start(self.config.epochs)?;
        }

        let mut history = Vec::new();

        for epoch in 1..=self.config.epochs {
            let outcome = trainer.run_episode()?;
            for observer in &mut self.observers {
                observer.on_episode_end(epoch, outcome)?;
            }

            if self.interval_due(self.config.eval_interval, epoch) && self.config.eval_games > 0 {
                let seed = self.config.seed.map(|s| s.wrapping_add(epoch as u64));
                let mut opponent = self.config.opponent.build(seed);
                let report = evaluate(trainer.table(), opponent.as_mut(), self.config.eval_games)?;

                for observer in &mut self.observers {
                    observer.on_evaluation(epoch, &report)?;
                }
                history.push((epoch, report));
            }

            if self.interval_due(self.config.checkpoint_interval, epoch) {
                self.checkpoint(trainer, epoch)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult {
            epochs: self.config.epochs,
            history,
            final_epsilon: trainer.epsilon(),
            states_learned: trainer.table().len(),
        })
    }

    fn interval_due(&self, interval: usize, epoch: usize) -> bool {
        interval > 0 && epoch.is_multiple_of(interval)
    }

    fn checkpoint(&mut self, trainer: &dyn Trainer, epoch: usize) -> Result<()> {
        let (Some(repository), Some(path)) = (&self.repository, &self.config.checkpoint_path)
        else {
            return Ok(());
        };

        let snapshot = SavedPolicy::capture(
            trainer,
            TrainingMetadata {
                epochs_trained: epoch,
                seed: self.config.seed,
            },
        );

        match repository.save(&snapshot, path) {
            Ok(()) => {
                for observer in &mut self.observers {
                    observer.on_checkpoint(epoch, path)?;
                }
            }
            Err(err) => {
                eprintln!(
                    "Warning: checkpoint at epoch {epoch} failed ({err}); continuing with the in-memory table"
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::{SarsaTrainer, TrainerConfig};
    use crate::pipeline::observers::MetricsObserver;

    fn quick_config() -> SessionConfig {
        SessionConfig {
            epochs: 20,
            eval_interval: 10,
            eval_games: 5,
            opponent: OpponentKind::Random,
            checkpoint_interval: 0,
            checkpoint_path: None,
            seed: Some(17),
        }
    }

    #[test]
    fn test_session_runs_and_reports_history() {
        let trainer_config = TrainerConfig {
            seed: Some(17),
            ..TrainerConfig::default()
        };
        let mut trainer = SarsaTrainer::new(&trainer_config);

        let mut session =
            TrainingSession::new(quick_config()).with_observer(Box::new(MetricsObserver::new()));
        let result = session.run(&mut trainer).unwrap();

        assert_eq!(result.epochs, 20);
        assert_eq!(result.history.len(), 2);
        assert_eq!(result.history[0].0, 10);
        assert_eq!(result.history[1].0, 20);
        assert!(result.states_learned > 0);
        assert!(result.final_epsilon < 1.0);
    }

    #[test]
    fn test_zero_intervals_disable_eval_and_checkpoints() {
        let mut config = quick_config();
        config.eval_interval = 0;

        let mut trainer = SarsaTrainer::new(&TrainerConfig {
            seed: Some(3),
            ..TrainerConfig::default()
        });
        let result = TrainingSession::new(config).run(&mut trainer).unwrap();
        assert!(result.history.is_empty());
    }
}
