//! Canonical state encoding from the mover's perspective
//!
//! Two boards that are mark-swaps of each other (with the side to move
//! flipped accordingly) present the same decision problem to the player
//! whose turn it is. Encoding cells relative to the mover collapses both
//! into a single key, which is what lets one value table serve both sides.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::{Board, Cell};

/// Number of raw side-relative boards (3^9)
pub const STATE_SPACE: usize = 19683;

/// Compact canonical key for a board position.
///
/// Each cell becomes a trit relative to the player to move (0 = empty,
/// 1 = mover's mark, 2 = opponent's mark) and the nine trits are packed
/// base-3 in row-major order, position 0 least significant. The packed
/// value is below 3^9 = 19683, so it fits a `u16`.
///
/// The encoding is a pure function of `(cells, to_move)` and injective
/// over side-relative views: distinct views never collide, and a board
/// together with its mark-swapped mirror map to the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct StateKey(u16);

impl StateKey {
    /// Encode a board from the perspective of the player to move
    pub fn encode(board: &Board) -> StateKey {
        let own = board.to_move().mark();
        let mut packed: u16 = 0;
        for pos in (0..9).rev() {
            let trit = match board.get(pos) {
                Cell::Empty => 0,
                mark if mark == own => 1,
                _ => 2,
            };
            packed = packed * 3 + trit;
        }
        StateKey(packed)
    }

    /// The packed base-3 value
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Unpack into side-relative trits, row-major
    pub fn trits(self) -> [u8; 9] {
        let mut digits = [0u8; 9];
        let mut rest = self.0;
        for digit in &mut digits {
            *digit = (rest % 3) as u8;
            rest /= 3;
        }
        digits
    }
}

impl TryFrom<u16> for StateKey {
    type Error = crate::Error;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if (value as usize) < STATE_SPACE {
            Ok(StateKey(value))
        } else {
            Err(crate::Error::InvalidStateKey { value })
        }
    }
}

impl From<StateKey> for u16 {
    fn from(key: StateKey) -> u16 {
        key.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for trit in self.trits() {
            write!(f, "{trit}")?;
        }
        Ok(())
    }
}
