//! Trainer port - abstraction over the learning rules

use crate::{
    Result,
    game::Status,
    learning::{Algorithm, ValueTable, VisitTable},
};

/// Unified interface over the self-play learning rules (SARSA,
/// Monte-Carlo control), so the training pipeline can drive either.
pub trait Trainer: Send {
    /// Play one self-play episode, apply the learning rule's updates, and
    /// decay the exploration schedule. Returns the episode's terminal
    /// outcome.
    fn run_episode(&mut self) -> Result<Status>;

    /// Which learning rule this trainer implements.
    fn algorithm(&self) -> Algorithm;

    /// The value table being learned. Shared read-only with evaluation.
    fn table(&self) -> &ValueTable;

    /// Visit counts, for rules that track them (`None` for SARSA).
    fn visits(&self) -> Option<&VisitTable>;

    /// Current exploration rate.
    fn epsilon(&self) -> f64;

    /// Human-readable rule name.
    fn name(&self) -> &str;
}
