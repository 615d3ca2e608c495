//! Epsilon-greedy action selection and exploration decay

use rand::{Rng, rngs::StdRng, seq::IndexedRandom};

use crate::{Result, game::StateKey, learning::value_table::ValueTable};

/// Multiplicatively decaying exploration rate with a floor.
///
/// The floor guarantees a nonzero exploration rate is retained
/// indefinitely.
#[derive(Debug, Clone, Copy)]
pub struct EpsilonSchedule {
    epsilon: f64,
    decay: f64,
    floor: f64,
}

impl EpsilonSchedule {
    pub fn new(initial: f64, decay: f64, floor: f64) -> Self {
        Self {
            epsilon: initial,
            decay,
            floor,
        }
    }

    /// Current exploration rate
    pub fn current(&self) -> f64 {
        self.epsilon
    }

    /// Apply one epoch of decay: `epsilon = max(epsilon * decay, floor)`
    pub fn step(&mut self) {
        self.epsilon = (self.epsilon * self.decay).max(self.floor);
    }

    /// Override the current rate (used when resuming from a snapshot)
    pub fn resume_at(&mut self, epsilon: f64) {
        self.epsilon = epsilon;
    }
}

/// ε-greedy selection over the legal moves of a state: with probability
/// `epsilon` a uniform random legal move, otherwise the table's greedy
/// action (first-found tie-break).
///
/// # Errors
///
/// Returns [`crate::Error::NoValidMoves`] when `legal` is empty.
pub fn epsilon_greedy(
    rng: &mut StdRng,
    table: &ValueTable,
    state: StateKey,
    legal: &[usize],
    epsilon: f64,
) -> Result<usize> {
    if rng.random::<f64>() < epsilon {
        match legal.choose(rng) {
            Some(&action) => Ok(action),
            None => Err(crate::Error::NoValidMoves),
        }
    } else {
        table
            .greedy_action(state, legal)
            .ok_or(crate::Error::NoValidMoves)
    }
}
