//! MessagePack implementation of the policy repository.
//!
//! This adapter implements the PolicyRepository port using rmp_serde for
//! compact binary serialization.

use std::{fs::File, path::Path};

use crate::{Result, error::Error, learning::SavedPolicy, ports::PolicyRepository};

/// MessagePack-based policy repository.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use noughts::{
///     SarsaTrainer, SavedPolicy, TrainerConfig,
///     adapters::MsgPackRepository,
///     learning::TrainingMetadata,
///     ports::PolicyRepository,
/// };
///
/// let trainer = SarsaTrainer::new(&TrainerConfig::default());
/// let snapshot = SavedPolicy::capture(&trainer, TrainingMetadata::default());
///
/// let repo = MsgPackRepository;
/// repo.save(&snapshot, Path::new("policy.msgpack"))?;
/// let loaded = repo.load(Path::new("policy.msgpack"))?;
/// # Ok::<(), noughts::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

impl PolicyRepository for MsgPackRepository {
    fn save(&self, policy: &SavedPolicy, path: &Path) -> Result<()> {
        let mut file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;

        rmp_serde::encode::write(&mut file, policy).map_err(|e| Error::SerializationContext {
            operation: "serialize policy to MessagePack".to_string(),
            message: e.to_string(),
        })?;

        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedPolicy> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let policy =
            rmp_serde::decode::from_read(&file).map_err(|e| Error::SerializationContext {
                operation: "deserialize policy from MessagePack".to_string(),
                message: e.to_string(),
            })?;

        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{
        learning::{SarsaTrainer, TrainerConfig, TrainingMetadata},
        ports::Trainer,
    };

    fn trained_snapshot() -> SavedPolicy {
        let config = TrainerConfig {
            seed: Some(5),
            ..TrainerConfig::default()
        };
        let mut trainer = SarsaTrainer::new(&config);
        for _ in 0..10 {
            trainer.run_episode().expect("episode should complete");
        }
        SavedPolicy::capture(
            &trainer,
            TrainingMetadata {
                epochs_trained: 10,
                seed: Some(5),
            },
        )
    }

    #[test]
    fn test_msgpack_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("policy.msgpack");

        let repo = MsgPackRepository::new();
        let snapshot = trained_snapshot();

        repo.save(&snapshot, &file_path).expect("Failed to save");
        let loaded = repo.load(&file_path).expect("Failed to load");

        assert_eq!(loaded.values, snapshot.values);
        assert_eq!(loaded.visits, snapshot.visits);
        assert_eq!(loaded.algorithm, snapshot.algorithm);
        assert_eq!(loaded.metadata.epochs_trained, 10);
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let repo = MsgPackRepository::new();
        let result = repo.load(Path::new("/tmp/nonexistent_12345.msgpack"));
        assert!(result.is_err());
    }

    #[test]
    fn test_save_to_invalid_path_returns_error() {
        let repo = MsgPackRepository::new();
        let snapshot = trained_snapshot();
        let result = repo.save(&snapshot, Path::new("/invalid_dir_12345/policy.msgpack"));
        assert!(result.is_err());
    }
}
