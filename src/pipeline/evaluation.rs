//! Match runner: evaluation games between a policy and an opponent
//!
//! The learned policy plays greedily (no exploration, no updates), so the
//! value table is shared read-only for the duration of an evaluation.
//! Results are tallied separately for the policy as first and as second
//! mover: until training converges the learned sign convention is not
//! symmetric between seats.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    game::{Board, Player, Status},
    learning::ValueTable,
    pipeline::opponents::GreedyAgent,
    ports::Agent,
};

/// Win/draw/loss counts for one seat
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatTally {
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

impl SeatTally {
    /// Record a finished game from the tallied player's perspective
    pub fn record(&mut self, status: Status, side: Player) {
        match status {
            Status::Won(winner) if winner == side => self.wins += 1,
            Status::Won(_) => self.losses += 1,
            _ => self.draws += 1,
        }
    }

    pub fn games(&self) -> usize {
        self.wins + self.draws + self.losses
    }

    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    pub fn loss_rate(&self) -> f64 {
        self.rate(self.losses)
    }

    fn rate(&self, count: usize) -> f64 {
        if self.games() == 0 {
            0.0
        } else {
            count as f64 / self.games() as f64
        }
    }
}

/// Per-seat evaluation results for one checkpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalReport {
    /// Policy moved first (played X)
    pub as_first: SeatTally,
    /// Policy moved second (played O)
    pub as_second: SeatTally,
}

/// Play one game between the policy and an opponent.
///
/// X always opens; `policy_first` decides which seat the policy takes.
/// Returns the terminal status of the board.
pub fn play_match(
    policy: &mut dyn Agent,
    opponent: &mut dyn Agent,
    policy_first: bool,
) -> Result<Status> {
    let mut board = Board::new();

    while board.status() == Status::Ongoing {
        let policy_turn = (board.to_move() == Player::X) == policy_first;
        let pos = if policy_turn {
            policy.select_move(&board)?
        } else {
            opponent.select_move(&board)?
        };
        board.make_move(pos)?;
    }

    Ok(board.status())
}

/// Evaluate the greedy policy over `games_per_seat` games in each seat
/// against the given opponent.
pub fn evaluate(
    table: &ValueTable,
    opponent: &mut dyn Agent,
    games_per_seat: usize,
) -> Result<EvalReport> {
    let mut policy = GreedyAgent::new(table);
    let mut report = EvalReport::default();

    for _ in 0..games_per_seat {
        let status = play_match(&mut policy, opponent, true)?;
        report.as_first.record(status, Player::X);
    }
    for _ in 0..games_per_seat {
        let status = play_match(&mut policy, opponent, false)?;
        report.as_second.record(status, Player::O);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::opponents::{PerfectAgent, RandomAgent};

    #[test]
    fn test_tally_perspective() {
        let mut tally = SeatTally::default();
        tally.record(Status::Won(Player::X), Player::X);
        tally.record(Status::Won(Player::O), Player::X);
        tally.record(Status::Draw, Player::X);

        assert_eq!(tally.wins, 1);
        assert_eq!(tally.losses, 1);
        assert_eq!(tally.draws, 1);
        assert!((tally.win_rate() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_self_play_draws_both_seats() {
        let mut a = PerfectAgent::new("A".to_string());
        let mut b = PerfectAgent::new("B".to_string());

        assert_eq!(play_match(&mut a, &mut b, true).unwrap(), Status::Draw);
        assert_eq!(play_match(&mut a, &mut b, false).unwrap(), Status::Draw);
    }

    #[test]
    fn test_empty_table_evaluation_completes() {
        let table = ValueTable::new();
        let mut opponent = RandomAgent::with_seed("Random".to_string(), 11);

        let report = evaluate(&table, &mut opponent, 5).unwrap();
        assert_eq!(report.as_first.games(), 5);
        assert_eq!(report.as_second.games(), 5);
    }
}
