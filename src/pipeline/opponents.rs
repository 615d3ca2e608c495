//! Baseline opponents and the greedy table policy

use rand::{SeedableRng, random, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Result,
    game::{Board, StateKey},
    learning::ValueTable,
    ports::Agent,
    search,
};

/// Baseline opponent families for training-time evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpponentKind {
    /// Uniform random over legal moves
    #[default]
    Random,
    /// Full-depth minimax (never loses)
    Perfect,
}

impl OpponentKind {
    pub fn label(self) -> &'static str {
        match self {
            OpponentKind::Random => "random",
            OpponentKind::Perfect => "perfect",
        }
    }

    /// Build a boxed agent of this kind
    pub fn build(self, seed: Option<u64>) -> Box<dyn Agent> {
        match self {
            OpponentKind::Random => match seed {
                Some(seed) => Box::new(RandomAgent::with_seed("Random".to_string(), seed)),
                None => Box::new(RandomAgent::new("Random".to_string())),
            },
            OpponentKind::Perfect => Box::new(PerfectAgent::new("Perfect".to_string())),
        }
    }
}

/// Random policy agent (baseline)
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a random agent with a deterministic seed
    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, board: &Board) -> Result<usize> {
        let moves = board.legal_moves();
        match moves.choose(&mut self.rng) {
            Some(&pos) => Ok(pos),
            None => Err(crate::Error::NoValidMoves),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Perfect player backed by full-depth alpha-beta search.
///
/// Searches a scratch copy of the board, so the caller's board is never
/// mutated.
pub struct PerfectAgent {
    name: String,
}

impl PerfectAgent {
    pub fn new(name: String) -> Self {
        Self { name }
    }
}

impl Agent for PerfectAgent {
    fn select_move(&mut self, board: &Board) -> Result<usize> {
        let mut scratch = *board;
        let result = search::solve(&mut scratch, board.to_move())?;
        result.position.ok_or(crate::Error::NoValidMoves)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Greedy policy over a learned value table: always the highest-valued
/// legal action, no exploration. Unknown states fall back to the implicit
/// zero vector, i.e. the first legal move.
pub struct GreedyAgent<'a> {
    name: String,
    table: &'a ValueTable,
}

impl<'a> GreedyAgent<'a> {
    pub fn new(table: &'a ValueTable) -> Self {
        Self {
            name: "Greedy".to_string(),
            table,
        }
    }
}

impl Agent for GreedyAgent<'_> {
    fn select_move(&mut self, board: &Board) -> Result<usize> {
        let state = StateKey::encode(board);
        self.table
            .greedy_action(state, &board.legal_moves())
            .ok_or(crate::Error::NoValidMoves)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;

    #[test]
    fn test_random_agent_selects_legal_move() {
        let mut agent = RandomAgent::with_seed("Random".to_string(), 3);
        let board = Board::new();
        let pos = agent.select_move(&board).unwrap();
        assert!(pos < 9);
    }

    #[test]
    fn test_perfect_agent_opens_center_or_corner() {
        let mut agent = PerfectAgent::new("Perfect".to_string());
        let board = Board::new();
        let pos = agent.select_move(&board).unwrap();
        assert!(pos == 4 || [0, 2, 6, 8].contains(&pos));
    }

    #[test]
    fn test_perfect_agent_does_not_mutate_board() {
        let mut agent = PerfectAgent::new("Perfect".to_string());
        let board = Board::new();
        agent.select_move(&board).unwrap();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_greedy_agent_follows_table() {
        let mut board = Board::new();
        board.make_move(0).unwrap();
        assert_eq!(board.to_move(), Player::O);

        let mut table = ValueTable::new();
        table.set(StateKey::encode(&board), 8, 2.0);

        let mut agent = GreedyAgent::new(&table);
        assert_eq!(agent.select_move(&board).unwrap(), 8);
    }

    #[test]
    fn test_agents_error_on_full_board() {
        let mut board = Board::new();
        for pos in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            board.make_move(pos).unwrap();
        }

        let table = ValueTable::new();
        assert!(GreedyAgent::new(&table).select_move(&board).is_err());
        assert!(
            RandomAgent::with_seed("Random".to_string(), 1)
                .select_move(&board)
                .is_err()
        );
    }
}
