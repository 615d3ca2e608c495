//! Tabular reinforcement learning through self-play
//!
//! Two learning rules share the same value table layout: on-policy SARSA
//! (temporal-difference, fixed learning rate) and Monte-Carlo control
//! (full-episode returns, exact incremental-mean steps). All mutable
//! training state (tables, epsilon schedule, hyperparameters, RNG) lives
//! in an explicit trainer object constructed once from a [`TrainerConfig`].

pub mod exploration;
pub mod monte_carlo;
pub mod sarsa;
pub mod serialization;
pub mod value_table;

pub use exploration::{EpsilonSchedule, epsilon_greedy};
pub use monte_carlo::{MonteCarloTrainer, Transition};
pub use sarsa::SarsaTrainer;
pub use serialization::{Algorithm, SavedPolicy, TrainingMetadata};
pub use value_table::{ACTION_COUNT, ValueTable, VisitTable};

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::game::{Player, Status};

/// Hyperparameters shared by both trainers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Learning rate α (SARSA only; MC control uses incremental means)
    pub alpha: f64,
    /// Discount factor γ
    pub gamma: f64,
    /// Initial exploration rate
    pub epsilon: f64,
    /// Multiplicative epsilon decay per epoch
    pub epsilon_decay: f64,
    /// Exploration floor; epsilon never decays below this
    pub min_epsilon: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.99,
            epsilon: 1.0,
            epsilon_decay: 0.999_988_5,
            min_epsilon: 0.1,
            seed: None,
        }
    }
}

pub(crate) fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Reward for the player who just moved into `status`: +1 for their win,
/// -1 for their loss, 0 for a draw or a non-terminal position.
pub(crate) fn terminal_reward(status: Status, mover: Player) -> f64 {
    match status {
        Status::Won(winner) if winner == mover => 1.0,
        Status::Won(_) => -1.0,
        _ => 0.0,
    }
}
