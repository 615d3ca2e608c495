//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines;

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }
}

/// A player in the game
///
/// X is the `+1` side and O the `-1` side; the sign convention only matters
/// for state encoding and reward bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to its board mark
    pub fn mark(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

/// Result of classifying a board position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Game still in progress
    Ongoing,
    /// Board full with no completed line
    Draw,
    /// Three in a row for the given player
    Won(Player),
}

impl Status {
    pub fn is_over(self) -> bool {
        self != Status::Ongoing
    }
}

/// Complete board state including cells and whose turn it is
///
/// Moves are applied and retracted in place: the search engine mutates a
/// single board down the whole recursion tree and restores it on the way
/// back up. `make_move`/`unmake_move` must therefore be paired in strict
/// LIFO order; no move history is stored internally.
///
/// The type is `Copy` (10 bytes), so consumers that need a scratch board
/// can simply copy it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
    to_move: Player,
}

impl Board {
    /// Create a new empty board with X to move
    pub fn new() -> Self {
        Self::new_with_player(Player::X)
    }

    /// Create a new empty board with a specified player to move first
    pub fn new_with_player(first_player: Player) -> Self {
        Board {
            cells: [Cell::Empty; 9],
            to_move: first_player,
        }
    }

    /// Create a board from a string representation.
    ///
    /// The string should contain 9 cell characters (whitespace is filtered
    /// out) and may optionally include a suffix `_X` or `_O` to explicitly
    /// set the player to move. When the suffix is omitted, the player is
    /// inferred from the piece counts with X-first semantics.
    ///
    /// # Errors
    ///
    /// Returns an error if the board part has fewer than 9 cells, a
    /// character is not a valid cell, the piece counts differ by more than
    /// one, or an explicit suffix conflicts with the counts.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let (board_part, suffix) = match cleaned.split_once('_') {
            Some((board, suffix)) => (board, Some(suffix)),
            None => (cleaned.as_str(), None),
        };

        let chars: Vec<char> = board_part.chars().collect();
        if chars.len() < 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().take(9).enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        let x_count = cells.iter().filter(|&&c| c == Cell::X).count();
        let o_count = cells.iter().filter(|&&c| c == Cell::O).count();
        if x_count.abs_diff(o_count) > 1 {
            return Err(crate::Error::InvalidPieceCounts { x_count, o_count });
        }

        let to_move = match suffix {
            Some("X") => Player::X,
            Some("O") => Player::O,
            Some(other) => {
                return Err(crate::Error::InvalidPlayerString {
                    player: other.to_string(),
                    context: s.to_string(),
                });
            }
            // Equal counts: the opener (X by convention) is to move again.
            None if x_count == o_count => Player::X,
            None if x_count > o_count => Player::O,
            None => Player::X,
        };

        let consistent = match to_move {
            Player::X => x_count == o_count || o_count == x_count + 1,
            Player::O => x_count == o_count || x_count == o_count + 1,
        };
        if !consistent {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "piece counts (X={x_count}, O={o_count}) are inconsistent with {to_move:?} to move in '{s}'"
                ),
            });
        }

        Ok(Board { cells, to_move })
    }

    /// Get the player to move
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Read-only view of the cells in row-major order
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    /// Count the number of occupied cells on the board
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Place the mover's mark at `pos` and flip the side to move.
    ///
    /// # Errors
    ///
    /// Returns an error if `pos` is out of range or the cell is occupied.
    /// Legality is always derivable from [`legal_moves`](Self::legal_moves),
    /// so an error here indicates a caller bug.
    pub fn make_move(&mut self, pos: usize) -> Result<(), crate::Error> {
        if pos >= 9 {
            return Err(crate::Error::InvalidPosition { position: pos });
        }
        if self.cells[pos] != Cell::Empty {
            return Err(crate::Error::InvalidMove { position: pos });
        }

        self.cells[pos] = self.to_move.mark();
        self.to_move = self.to_move.opponent();
        Ok(())
    }

    /// Clear the mark at `pos` and flip the side to move back.
    ///
    /// Must be the exact inverse of the preceding [`make_move`](Self::make_move);
    /// callers are responsible for strict LIFO pairing.
    ///
    /// # Errors
    ///
    /// Returns an error if `pos` is out of range or the cell is empty.
    pub fn unmake_move(&mut self, pos: usize) -> Result<(), crate::Error> {
        if pos >= 9 {
            return Err(crate::Error::InvalidPosition { position: pos });
        }
        if self.cells[pos] == Cell::Empty {
            return Err(crate::Error::VacantCell { position: pos });
        }

        self.cells[pos] = Cell::Empty;
        self.to_move = self.to_move.opponent();
        Ok(())
    }

    /// Get the empty-cell indices in row-major scan order.
    ///
    /// This fixed order doubles as the tie-break order for greedy action
    /// selection and search, so it must stay deterministic.
    pub fn legal_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Classify the position.
    ///
    /// Lines are checked before board fullness: a full board containing a
    /// completed line is a win, not a draw.
    pub fn status(&self) -> Status {
        if let Some(winner) = lines::line_winner(&self.cells) {
            return Status::Won(winner);
        }
        if self.cells.contains(&Cell::Empty) {
            Status::Ongoing
        } else {
            Status::Draw
        }
    }

    /// Check if a player has won
    pub fn has_won(&self, player: Player) -> bool {
        lines::has_won(&self.cells, player)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        lines::line_winner(&self.cells)
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.status().is_over()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board() {
        let board = Board::new();
        assert_eq!(board.to_move(), Player::X);
        for i in 0..9 {
            assert_eq!(board.get(i), Cell::Empty);
        }
        assert_eq!(board.status(), Status::Ongoing);
    }

    #[test]
    fn test_make_move() {
        let mut board = Board::new();

        board.make_move(4).unwrap();
        assert_eq!(board.get(4), Cell::X);
        assert_eq!(board.to_move(), Player::O);

        let result = board.make_move(4);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("occupied"));

        assert!(board.make_move(9).is_err());
    }

    #[test]
    fn test_unmake_restores_exact_state() {
        let mut board = Board::new();
        board.make_move(4).unwrap();
        board.make_move(0).unwrap();
        let before = board;

        board.make_move(8).unwrap();
        board.unmake_move(8).unwrap();

        assert_eq!(board, before);
        assert_eq!(board.to_move(), before.to_move());
    }

    #[test]
    fn test_unmake_empty_cell_is_error() {
        let mut board = Board::new();
        assert!(board.unmake_move(0).is_err());
    }

    #[test]
    fn test_legal_moves_scan_order() {
        let mut board = Board::new();
        assert_eq!(board.legal_moves(), (0..9).collect::<Vec<_>>());

        board.make_move(3).unwrap();
        let legal = board.legal_moves();
        assert_eq!(legal, vec![0, 1, 2, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_win_detection_top_row() {
        let mut board = Board::new();
        for pos in [0, 3, 1, 4, 2] {
            board.make_move(pos).unwrap();
        }
        assert_eq!(board.status(), Status::Won(Player::X));
        assert_eq!(board.winner(), Some(Player::X));
        assert!(board.has_won(Player::X));
        assert!(board.is_terminal());
    }

    #[test]
    fn test_win_detection_column() {
        let mut board = Board::new();
        for pos in [0, 1, 2, 4, 5, 7] {
            board.make_move(pos).unwrap();
        }
        assert_eq!(board.status(), Status::Won(Player::O));
    }

    #[test]
    fn test_draw_detection() {
        let mut board = Board::new();
        for pos in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            board.make_move(pos).unwrap();
        }
        assert_eq!(board.occupied_count(), 9);
        assert_eq!(board.status(), Status::Draw);
    }

    #[test]
    fn test_win_on_final_move_is_not_a_draw() {
        // Board fills completely and the last move completes a line:
        // line precedence must classify this as a win.
        let mut board = Board::new();
        for pos in [0, 2, 4, 3, 1, 6, 5, 7, 8] {
            board.make_move(pos).unwrap();
        }
        assert_eq!(board.occupied_count(), 9);
        assert_eq!(board.status(), Status::Won(Player::X));
    }

    #[test]
    fn test_from_string() {
        let board = Board::from_string("XOX......").unwrap();
        assert_eq!(board.get(0), Cell::X);
        assert_eq!(board.get(1), Cell::O);
        assert_eq!(board.to_move(), Player::O);

        assert!(Board::from_string("XO").is_err());
        assert!(Board::from_string("XOZ......").is_err());
        assert!(Board::from_string("XXX.X....").is_err());
    }

    #[test]
    fn test_from_string_with_turn_suffix() {
        let board = Board::from_string("........._O").unwrap();
        assert_eq!(board.to_move(), Player::O);

        assert!(Board::from_string("X........_X").is_err());
        assert!(Board::from_string("........._Z").is_err());
    }

    #[test]
    fn test_display() {
        let board = Board::from_string("XOX.O.X..").unwrap();
        let display = format!("{board}");
        assert!(display.contains("XOX"));
        assert!(display.contains(".O."));
        assert!(display.contains("X.."));
    }
}
