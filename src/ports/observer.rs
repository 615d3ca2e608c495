//! Observer port - abstraction for training observation
//!
//! Observers compose data collection onto the training loop without
//! coupling it to specific output formats: progress bars, metrics
//! tracking, CSV export.

use std::path::Path;

use crate::{Result, game::Status, pipeline::evaluation::EvalReport};

/// Observer trait for monitoring a training session.
///
/// # Event Sequence
///
/// 1. `on_training_start(total_epochs)` - once at the beginning
/// 2. Per epoch: `on_episode_end(epoch, outcome)`, then optionally
///    `on_evaluation(epoch, report)` and `on_checkpoint(epoch, path)`
///    when the respective intervals fire
/// 3. `on_training_end()` - once at the end
///
/// All methods default to no-ops so observers only implement the events
/// they care about.
pub trait Observer: Send {
    /// Called once before the first episode.
    fn on_training_start(&mut self, _total_epochs: usize) -> Result<()> {
        Ok(())
    }

    /// Called after every self-play episode with its terminal outcome.
    fn on_episode_end(&mut self, _epoch: usize, _outcome: Status) -> Result<()> {
        Ok(())
    }

    /// Called after each evaluation checkpoint with the per-seat report.
    fn on_evaluation(&mut self, _epoch: usize, _report: &EvalReport) -> Result<()> {
        Ok(())
    }

    /// Called after a policy snapshot has been written.
    fn on_checkpoint(&mut self, _epoch: usize, _path: &Path) -> Result<()> {
        Ok(())
    }

    /// Called once after the final episode.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
