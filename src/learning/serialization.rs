//! Snapshot types for persisting trained policies

use serde::{Deserialize, Serialize};

use crate::{
    learning::value_table::{ValueTable, VisitTable},
    ports::Trainer,
};

/// Which learning rule produced a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    Sarsa,
    MonteCarlo,
}

impl Algorithm {
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Sarsa => "sarsa",
            Algorithm::MonteCarlo => "monte-carlo",
        }
    }
}

/// Provenance recorded alongside a snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingMetadata {
    /// Total self-play epochs the tables have seen
    pub epochs_trained: usize,
    /// Seed the training run started from, if deterministic
    pub seed: Option<u64>,
}

/// A persistable policy: the key→vector value table, visit counts, and
/// enough context to resume training.
///
/// The persistence collaborator treats this as an opaque blob; consumers
/// loading a snapshot must tolerate its absence by starting from an empty
/// table instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPolicy {
    pub algorithm: Algorithm,
    /// Exploration rate at snapshot time, for resuming the decay schedule
    pub epsilon: f64,
    pub values: ValueTable,
    /// Empty for algorithms that do not track visit counts
    pub visits: VisitTable,
    pub metadata: TrainingMetadata,
}

impl SavedPolicy {
    /// Capture the current state of a trainer
    pub fn capture(trainer: &dyn Trainer, metadata: TrainingMetadata) -> Self {
        Self {
            algorithm: trainer.algorithm(),
            epsilon: trainer.epsilon(),
            values: trainer.table().clone(),
            visits: trainer.visits().cloned().unwrap_or_default(),
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::{SarsaTrainer, TrainerConfig};

    #[test]
    fn test_capture_records_algorithm_and_tables() {
        let config = TrainerConfig {
            seed: Some(9),
            ..TrainerConfig::default()
        };
        let mut trainer = SarsaTrainer::new(&config);
        trainer.run_episode().unwrap();

        let saved = SavedPolicy::capture(
            &trainer,
            TrainingMetadata {
                epochs_trained: 1,
                seed: Some(9),
            },
        );

        assert_eq!(saved.algorithm, Algorithm::Sarsa);
        assert!(!saved.values.is_empty());
        assert!(saved.visits.is_empty());
        assert_eq!(saved.metadata.epochs_trained, 1);
    }
}
