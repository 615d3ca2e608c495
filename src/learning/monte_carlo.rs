//! Monte-Carlo control self-play trainer
//!
//! Runs a complete episode, records the transition trace, then backs the
//! discounted return up the trace in reverse. The step size is the exact
//! incremental mean `(G - Q) / N`, so updates shrink as a state-action
//! pair accumulates visits and the estimate converges to the expected
//! return under the policy.

use rand::rngs::StdRng;

use crate::{
    Result,
    game::{Board, StateKey, Status},
    learning::{
        TrainerConfig, build_rng,
        exploration::{EpsilonSchedule, epsilon_greedy},
        serialization::Algorithm,
        terminal_reward,
        value_table::{ValueTable, VisitTable},
    },
    ports::Trainer,
};

/// One step of an episode as recorded for the backward pass
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: StateKey,
    pub action: usize,
    pub reward: f64,
    pub next_state: StateKey,
    pub next_legal: Vec<usize>,
    pub done: bool,
}

/// Monte-Carlo control learning context
#[derive(Debug, Clone)]
pub struct MonteCarloTrainer {
    table: ValueTable,
    visits: VisitTable,
    gamma: f64,
    schedule: EpsilonSchedule,
    rng: StdRng,
    trace: Vec<Transition>,
}

impl MonteCarloTrainer {
    pub fn new(config: &TrainerConfig) -> Self {
        Self {
            table: ValueTable::new(),
            visits: VisitTable::new(),
            gamma: config.gamma,
            schedule: EpsilonSchedule::new(config.epsilon, config.epsilon_decay, config.min_epsilon),
            rng: build_rng(config.seed),
            trace: Vec::with_capacity(9),
        }
    }

    /// Resume from previously trained tables
    pub fn with_tables(mut self, table: ValueTable, visits: VisitTable) -> Self {
        self.table = table;
        self.visits = visits;
        self
    }

    /// Resume the exploration rate recorded in a snapshot
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.schedule.resume_at(epsilon);
        self
    }

    /// Trace of the most recently completed episode
    pub fn last_episode(&self) -> &[Transition] {
        &self.trace
    }

    fn play_episode(&mut self) -> Result<Status> {
        self.trace.clear();
        let mut board = Board::new();
        let epsilon = self.schedule.current();

        loop {
            let mover = board.to_move();
            let state = StateKey::encode(&board);
            let legal = board.legal_moves();

            let action = epsilon_greedy(&mut self.rng, &self.table, state, &legal, epsilon)?;
            board.make_move(action)?;

            let status = board.status();
            let done = status.is_over();
            self.trace.push(Transition {
                state,
                action,
                reward: terminal_reward(status, mover),
                next_state: StateKey::encode(&board),
                next_legal: board.legal_moves(),
                done,
            });

            if done {
                return Ok(status);
            }
        }
    }

    /// Back the discounted return up the recorded trace:
    /// `G = r + γ·G`, `N[s][a] += 1`, `Q[s][a] += (G − Q[s][a]) / N[s][a]`.
    fn backup(&mut self) {
        let mut g = 0.0;
        for step in self.trace.iter().rev() {
            g = step.reward + self.gamma * g;
            let n = self.visits.record(step.state, step.action);
            let q = self.table.value(step.state, step.action);
            self.table
                .set(step.state, step.action, q + (g - q) / f64::from(n));
        }
    }
}

impl Trainer for MonteCarloTrainer {
    fn run_episode(&mut self) -> Result<Status> {
        let outcome = self.play_episode()?;
        self.backup();
        self.schedule.step();
        Ok(outcome)
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::MonteCarlo
    }

    fn table(&self) -> &ValueTable {
        &self.table
    }

    fn visits(&self) -> Option<&VisitTable> {
        Some(&self.visits)
    }

    fn epsilon(&self) -> f64 {
        self.schedule.current()
    }

    fn name(&self) -> &str {
        "Monte-Carlo control"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;

    fn greedy_config() -> TrainerConfig {
        TrainerConfig {
            epsilon: 0.0,
            min_epsilon: 0.0,
            seed: Some(42),
            ..TrainerConfig::default()
        }
    }

    #[test]
    fn test_first_episode_backs_up_discounted_returns() {
        // Greedy over an empty table walks cells in scan order; X completes
        // 2-4-6 on the seventh ply. The terminal transition gets G = 1 and
        // each earlier step one more factor of gamma.
        let mut trainer = MonteCarloTrainer::new(&greedy_config());
        let outcome = trainer.run_episode().unwrap();
        assert_eq!(outcome, Status::Won(Player::X));
        assert_eq!(trainer.last_episode().len(), 7);

        let gamma = 0.99f64;
        for (t, step) in trainer.last_episode().iter().enumerate() {
            let expected = gamma.powi(6 - t as i32);
            assert!((trainer.table().value(step.state, step.action) - expected).abs() < 1e-12);
            assert_eq!(trainer.visits.count(step.state, step.action), 1);
        }
    }

    #[test]
    fn test_update_magnitude_shrinks_with_visits() {
        let mut trainer = MonteCarloTrainer::new(&greedy_config());
        trainer.run_episode().unwrap();

        let first: Vec<(StateKey, usize, f64)> = trainer
            .last_episode()
            .iter()
            .map(|s| (s.state, s.action, trainer.table().value(s.state, s.action)))
            .collect();

        // The greedy policy replays the same trajectory; with Q already at
        // the episode return, the incremental-mean step is zero.
        trainer.run_episode().unwrap();
        for (state, action, before) in first {
            let after = trainer.table().value(state, action);
            assert!((after - before).abs() < 1e-12);
            assert_eq!(trainer.visits.count(state, action), 2);
        }
    }

    #[test]
    fn test_trace_records_full_tuples() {
        let mut trainer = MonteCarloTrainer::new(&greedy_config());
        trainer.run_episode().unwrap();

        let trace = trainer.last_episode();
        let terminal = trace.last().unwrap();
        assert!(terminal.done);
        assert_eq!(terminal.reward, 1.0);
        for step in &trace[..trace.len() - 1] {
            assert!(!step.done);
            assert_eq!(step.reward, 0.0);
            assert!(!step.next_legal.is_empty());
        }
    }
}
