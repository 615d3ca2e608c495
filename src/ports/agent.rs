//! Agent port - abstraction for move selection
//!
//! This port is what the match runner plays against: anything that can
//! pick a legal move for a board. Implementations include the random
//! baseline, the perfect minimax player, and the greedy table policy.

use crate::{Result, game::Board};

/// Unified interface for move-selecting players.
///
/// Agents receive a read-only board; implementations that search copy it
/// into a scratch board first. Match runners never ask an agent to learn;
/// evaluation is frozen by construction.
///
/// # Examples
///
/// ```no_run
/// use noughts::{game::Board, ports::Agent};
///
/// fn play_one_move(agent: &mut dyn Agent, board: &mut Board) -> noughts::Result<()> {
///     let pos = agent.select_move(board)?;
///     board.make_move(pos)
/// }
/// ```
pub trait Agent: Send {
    /// Select a move (0-8) for the given board state.
    ///
    /// # Errors
    ///
    /// Returns an error if no legal moves are available (terminal state).
    fn select_move(&mut self, board: &Board) -> Result<usize>;

    /// The agent's name, for reports and logging.
    fn name(&self) -> &str;
}
