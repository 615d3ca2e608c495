//! Board state, win-line analysis, and canonical state encoding

pub mod board;
pub mod encoding;
pub mod lines;

pub use board::{Board, Cell, Player, Status};
pub use encoding::{STATE_SPACE, StateKey};
