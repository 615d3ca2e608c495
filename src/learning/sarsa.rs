//! On-policy SARSA self-play trainer
//!
//! One trainer drives both sides of every episode through a single
//! side-relative value table. The bootstrap action selected during an
//! update is the action actually played at the next ply, which is the
//! on-policy contract: the behavior policy and the learned policy are the
//! same epsilon-greedy policy.

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

/// SARSA learning context: value table, hyperparameters, epsilon schedule,
/// and RNG, constructed once and threaded through the training loop.
#[derive(Debug, Clone)]
pub struct SarsaTrainer {
    table: ValueTable,
    alpha: f64,
    gamma: f64,
    schedule: EpsilonSchedule,
    rng: StdRng,
}

impl SarsaTrainer {
    pub fn new(config: &TrainerConfig) -> Self {
        Self {
            table: ValueTable::new(),
            alpha: config.alpha,
            gamma: config.gamma,
            schedule: EpsilonSchedule::new(config.epsilon, config.epsilon_decay, config.min_epsilon),
            rng: build_rng(config.seed),
        }
    }

    /// Resume from a previously trained table
    pub fn with_table(mut self, table: ValueTable) -> Self {
        self.table = table;
        self
    }

    /// Resume the exploration rate recorded in a snapshot
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.schedule.resume_at(epsilon);
        self
    }

    /// Non-terminal step: `Q[s][a] += α(γ·Q[s'][a'] − Q[s][a])`.
    ///
    /// `next_action` must be the action that will actually be played in
    /// `next_state`.
    pub fn bootstrap_update(
        &mut self,
        state: StateKey,
        action: usize,
        next_state: StateKey,
        next_action: usize,
    ) {
        let current = self.table.value(state, action);
        let target = self.gamma * self.table.value(next_state, next_action);
        self.table
            .set(state, action, current + self.alpha * (target - current));
    }

    /// Terminal step: `Q[s][a] += α(r − Q[s][a])` for the move that ended
    /// the game, plus the one-ply backward correction: the preceding
    /// state-action pair (the opponent's last move) receives the negated
    /// reward, since the terminal reward for the last mover is the loss
    /// signal for whoever moved just before.
    pub fn terminal_update(
        &mut self,
        state: StateKey,
        action: usize,
        reward: f64,
        previous: Option<(StateKey, usize)>,
    ) {
        let current = self.table.value(state, action);
        self.table
            .set(state, action, current + self.alpha * (reward - current));

        if let Some((prev_state, prev_action)) = previous {
            let prev_current = self.table.value(prev_state, prev_action);
            self.table.set(
                prev_state,
                prev_action,
                prev_current + self.alpha * (-reward - prev_current),
            );
        }
    }

    fn play_episode(&mut self) -> Result<Status> {
        let mut board = Board::new();
        // Action pre-selected by the previous step's bootstrap, if any.
        let mut pending: Option<usize> = None;
        let mut previous: Option<(StateKey, usize)> = None;
        let epsilon = self.schedule.current();

        loop {
            let mover = board.to_move();
            let state = StateKey::encode(&board);
            let legal = board.legal_moves();

            let action = match pending.take() {
                Some(action) => action,
                None => epsilon_greedy(&mut self.rng, &self.table, state, &legal, epsilon)?,
            };
            board.make_move(action)?;

            let status = board.status();
            if status.is_over() {
                let reward = terminal_reward(status, mover);
                self.terminal_update(state, action, reward, previous);
                return Ok(status);
            }

            let next_state = StateKey::encode(&board);
            let next_legal = board.legal_moves();
            let next_action =
                epsilon_greedy(&mut self.rng, &self.table, next_state, &next_legal, epsilon)?;
            self.bootstrap_update(state, action, next_state, next_action);

            pending = Some(next_action);
            previous = Some((state, action));
        }
    }
}

impl Trainer for SarsaTrainer {
    fn run_episode(&mut self) -> Result<Status> {
        let outcome = self.play_episode()?;
        self.schedule.step();
        Ok(outcome)
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Sarsa
    }

    fn table(&self) -> &ValueTable {
        &self.table
    }

    fn visits(&self) -> Option<&VisitTable> {
        None
    }

    fn epsilon(&self) -> f64 {
        self.schedule.current()
    }

    fn name(&self) -> &str {
        "SARSA"
    }
}
