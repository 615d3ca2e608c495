//! Training and evaluation pipeline
//!
//! The pipeline drives a trainer through self-play epochs, periodically
//! evaluating the frozen greedy policy against a baseline opponent and
//! checkpointing the tables at epoch boundaries.

pub mod evaluation;
pub mod observers;
pub mod opponents;
pub mod training;

pub use evaluation::{EvalReport, SeatTally, evaluate, play_match};
pub use observers::{MetricsObserver, ProgressObserver};
pub use opponents::{GreedyAgent, OpponentKind, PerfectAgent, RandomAgent};
pub use training::{SessionConfig, TrainingResult, TrainingSession};
