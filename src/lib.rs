//! Tic-tac-toe decision-making core
//!
//! This crate provides:
//! - Complete 3x3 board implementation with in-place make/unmake moves
//! - Exhaustive minimax search with alpha-beta pruning (provably optimal play)
//! - Tabular reinforcement learning via on-policy SARSA and Monte-Carlo control
//! - Self-play training pipeline with evaluation, checkpointing, and metrics export

pub mod adapters;
pub mod cli;
pub mod error;
pub mod game;
pub mod learning;
pub mod pipeline;
pub mod ports;
pub mod search;

pub use error::{Error, Result};
pub use game::{Board, Cell, Player, StateKey, Status};
pub use learning::{
    Algorithm, MonteCarloTrainer, SarsaTrainer, SavedPolicy, TrainerConfig, ValueTable, VisitTable,
};
pub use search::{SearchResult, best_move};
