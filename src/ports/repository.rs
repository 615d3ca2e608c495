//! Repository port for policy persistence.
//!
//! This trait abstracts the storage mechanism for trained policies,
//! allowing different implementations (MessagePack files, in-memory maps
//! for tests) without coupling the training loop to a serialization
//! format.

use std::path::Path;

use crate::{Result, learning::SavedPolicy};

/// Port for persisting and loading policy snapshots.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use noughts::{SavedPolicy, ports::PolicyRepository};
///
/// fn checkpoint<R: PolicyRepository>(
///     repo: &R,
///     policy: &SavedPolicy,
///     path: &Path,
/// ) -> noughts::Result<()> {
///     repo.save(policy, path)
/// }
/// ```
pub trait PolicyRepository {
    /// Save a policy snapshot to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be written or serialization
    /// fails. Training loops treat this as a warning and continue with the
    /// in-memory tables.
    fn save(&self, policy: &SavedPolicy, path: &Path) -> Result<()>;

    /// Load a policy snapshot from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be read, or
    /// fails to deserialize. Callers starting up should treat a missing
    /// snapshot as an empty table rather than a fatal condition.
    fn load(&self, path: &Path) -> Result<SavedPolicy>;
}
