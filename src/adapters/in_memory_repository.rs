//! In-memory implementation of the policy repository, for tests

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::{Result, error::Error, learning::SavedPolicy, ports::PolicyRepository};

/// Policy repository backed by a process-local map keyed by path.
///
/// Useful in tests and pipelines that should not touch the filesystem.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    storage: Mutex<HashMap<PathBuf, SavedPolicy>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored snapshots
    pub fn len(&self) -> usize {
        self.storage.lock().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PolicyRepository for InMemoryRepository {
    fn save(&self, policy: &SavedPolicy, path: &Path) -> Result<()> {
        let mut storage = self
            .storage
            .lock()
            .map_err(|_| Error::InvalidConfiguration {
                message: "in-memory repository lock poisoned".to_string(),
            })?;
        storage.insert(path.to_path_buf(), policy.clone());
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedPolicy> {
        let storage = self
            .storage
            .lock()
            .map_err(|_| Error::InvalidConfiguration {
                message: "in-memory repository lock poisoned".to_string(),
            })?;
        storage.get(path).cloned().ok_or_else(|| Error::Io {
            operation: format!("open snapshot {path:?}"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })
    }
}
