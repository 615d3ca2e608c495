//! Exhaustive minimax search with alpha-beta pruning
//!
//! The search mutates a single shared board with make/unmake rather than
//! allocating a new board per node; every recursive call restores the
//! board exactly before returning. The tree is at most 9 plies deep, so a
//! full-depth search always reaches terminal states; the depth limit is a
//! defensive bound, not a heuristic horizon.

use crate::{
    Result,
    game::{Board, Player, Status},
};

/// Outcome of a search: the chosen position and its game-theoretic score.
///
/// `position` is `None` when the root was already terminal or the depth
/// budget was zero. Scores are `+(depth_left + 1)` for a win for the
/// searching player and the negation for a loss, so faster wins and slower
/// losses score higher; draws and non-terminal cutoffs score 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub position: Option<usize>,
    pub score: i32,
}

impl SearchResult {
    /// Row of the chosen position, if any
    pub fn row(&self) -> Option<usize> {
        self.position.map(|pos| pos / 3)
    }

    /// Column of the chosen position, if any
    pub fn col(&self) -> Option<usize> {
        self.position.map(|pos| pos % 3)
    }
}

/// Find the optimal move for `for_player` on the given board.
///
/// The maximizing/minimizing role at each node is decided by comparing the
/// board's side to move against `for_player`, so the search may be entered
/// from either side's turn. Ties keep the first move found in scan order.
///
/// Calling with a terminal board returns the terminal utility directly with
/// no move; this is a valid input, not an error.
pub fn best_move(board: &mut Board, depth: usize, for_player: Player) -> Result<SearchResult> {
    minimax(board, depth, for_player, i32::MIN, i32::MAX)
}

/// Full-depth search: enough budget to reach every terminal state
pub fn solve(board: &mut Board, for_player: Player) -> Result<SearchResult> {
    let depth = board.legal_moves().len();
    best_move(board, depth, for_player)
}

fn terminal_score(status: Status, depth_left: usize, for_player: Player) -> i32 {
    let magnitude = depth_left as i32 + 1;
    match status {
        Status::Won(winner) if winner == for_player => magnitude,
        Status::Won(_) => -magnitude,
        // Draw, or a depth cutoff on a non-terminal node: neutral score.
        _ => 0,
    }
}

fn minimax(
    board: &mut Board,
    depth: usize,
    for_player: Player,
    mut alpha: i32,
    mut beta: i32,
) -> Result<SearchResult> {
    let status = board.status();
    if status.is_over() || depth == 0 {
        return Ok(SearchResult {
            position: None,
            score: terminal_score(status, depth, for_player),
        });
    }

    let maximizing = board.to_move() == for_player;
    let mut best = SearchResult {
        position: None,
        score: if maximizing { i32::MIN } else { i32::MAX },
    };

    for pos in board.legal_moves() {
        board.make_move(pos)?;
        let child = minimax(board, depth - 1, for_player, alpha, beta)?;
        board.unmake_move(pos)?;

        // Strict comparisons keep the first-found move on ties.
        if maximizing {
            if child.score > best.score {
                best = SearchResult {
                    position: Some(pos),
                    score: child.score,
                };
            }
            alpha = alpha.max(best.score);
        } else {
            if child.score < best.score {
                best = SearchResult {
                    position: Some(pos),
                    score: child.score,
                };
            }
            beta = beta.min(best.score);
        }

        if beta <= alpha {
            break;
        }
    }

    Ok(best)
}
