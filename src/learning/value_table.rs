//! Value table and visit counts over encoded states

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::game::StateKey;

/// One value slot per board cell
pub const ACTION_COUNT: usize = 9;

/// Mapping from encoded state to a per-action value vector.
///
/// Absent states are implicitly all-zero vectors ("no knowledge yet"), so
/// lookups never fail and an empty table is a valid starting point. Entries
/// are only meaningful at the legal-move indices of the encoded state.
///
/// A `BTreeMap` keeps iteration and serialization order deterministic,
/// which makes snapshots byte-stable for a given table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueTable {
    values: BTreeMap<StateKey, [f64; ACTION_COUNT]>,
}

impl ValueTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Action-value vector for a state (all zeros when absent)
    pub fn action_values(&self, state: StateKey) -> [f64; ACTION_COUNT] {
        self.values
            .get(&state)
            .copied()
            .unwrap_or([0.0; ACTION_COUNT])
    }

    /// Value of a single state-action pair
    pub fn value(&self, state: StateKey, action: usize) -> f64 {
        self.values
            .get(&state)
            .map(|row| row[action])
            .unwrap_or(0.0)
    }

    /// Overwrite the value of a state-action pair
    pub fn set(&mut self, state: StateKey, action: usize, value: f64) {
        self.values.entry(state).or_insert([0.0; ACTION_COUNT])[action] = value;
    }

    /// Highest-valued legal action, breaking ties by first-found in scan
    /// order. Returns `None` only when `legal` is empty.
    pub fn greedy_action(&self, state: StateKey, legal: &[usize]) -> Option<usize> {
        let values = self.action_values(state);
        let (&first, rest) = legal.split_first()?;
        let mut best = first;
        for &action in rest {
            if values[action] > values[best] {
                best = action;
            }
        }
        Some(best)
    }

    /// Number of states with stored vectors
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Visit counts per state-action pair, parallel to [`ValueTable`].
///
/// Monte-Carlo control divides by these counts to get an exact
/// incremental-mean step size; the count is incremented once per action
/// whose return is backed up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisitTable {
    counts: BTreeMap<StateKey, [u32; ACTION_COUNT]>,
}

impl VisitTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the visit count for a state-action pair and return the
    /// new count (always >= 1).
    pub fn record(&mut self, state: StateKey, action: usize) -> u32 {
        let slot = &mut self.counts.entry(state).or_insert([0; ACTION_COUNT])[action];
        *slot += 1;
        *slot
    }

    /// Current visit count for a state-action pair
    pub fn count(&self, state: StateKey, action: usize) -> u32 {
        self.counts.get(&state).map(|row| row[action]).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
