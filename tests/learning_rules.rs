//! Learning-rule properties: SARSA terminal credit assignment,
//! Monte-Carlo incremental means, and exploration decay

use noughts::{
    Board, MonteCarloTrainer, Player, SarsaTrainer, StateKey, Status, TrainerConfig,
    ports::Trainer,
};

fn deterministic_config() -> TrainerConfig {
    TrainerConfig {
        alpha: 0.1,
        gamma: 0.99,
        epsilon: 0.0,
        epsilon_decay: 1.0,
        min_epsilon: 0.0,
        seed: Some(1),
    }
}

/// Replay the fully greedy trajectory over an empty table: each side takes
/// the first legal cell, so X plays 0,2,4 and completes 2-4-6 on ply 7.
fn greedy_trajectory_states() -> Vec<(StateKey, usize, Player)> {
    let mut board = Board::new();
    let mut steps = Vec::new();
    for pos in 0..7 {
        steps.push((StateKey::encode(&board), pos, board.to_move()));
        board.make_move(pos).unwrap();
    }
    assert_eq!(board.status(), Status::Won(Player::X));
    steps
}

/// A terminal SARSA transition updates both the game-ending pair and the
/// immediately preceding pair, with opposite-signed rewards.
#[test]
fn test_sarsa_terminal_double_update() {
    let mut trainer = SarsaTrainer::new(&deterministic_config());
    let outcome = trainer.run_episode().unwrap();
    assert_eq!(outcome, Status::Won(Player::X));

    let steps = greedy_trajectory_states();
    let (winning_state, winning_action, winner) = steps[6];
    let (losing_state, losing_action, loser) = steps[5];
    assert_eq!(winner, Player::X);
    assert_eq!(loser, Player::O);

    // alpha * (+1) for the winning move, alpha * (-1) for the reply that
    // allowed it.
    let alpha = 0.1;
    assert!((trainer.table().value(winning_state, winning_action) - alpha).abs() < 1e-12);
    assert!((trainer.table().value(losing_state, losing_action) + alpha).abs() < 1e-12);

    // Every earlier pair only received zero-delta bootstrap updates.
    for &(state, action, _) in &steps[..5] {
        assert_eq!(trainer.table().value(state, action), 0.0);
    }
}

/// The punished reply steers the greedy policy on the very next episode:
/// O abandons the move that fed X's win, and the episode follows a new
/// line whose terminal pairs receive the double update in turn.
#[test]
fn test_sarsa_punished_reply_changes_policy() {
    let mut trainer = SarsaTrainer::new(&deterministic_config());
    trainer.run_episode().unwrap();

    let steps = greedy_trajectory_states();
    let (punished_state, punished_action, _) = steps[5];
    assert!(trainer.table().value(punished_state, punished_action) < 0.0);

    // Episode 2: at that state O now prefers cell 6 over the punished 5,
    // and the game continues 0,1,2,3,4,6,5,7,8 with X winning on 2-5-8.
    let outcome = trainer.run_episode().unwrap();
    assert_eq!(outcome, Status::Won(Player::X));

    let mut board = Board::new();
    for pos in [0, 1, 2, 3, 4, 6, 5] {
        board.make_move(pos).unwrap();
    }
    let before_losing_reply = StateKey::encode(&board); // O to move
    board.make_move(7).unwrap();
    let before_winning_move = StateKey::encode(&board); // X to move

    let alpha = 0.1;
    assert!((trainer.table().value(before_winning_move, 8) - alpha).abs() < 1e-12);
    assert!((trainer.table().value(before_losing_reply, 7) + alpha).abs() < 1e-12);
}

/// Monte-Carlo control is an exact incremental mean: with a repeating
/// episode the first backup lands on the return and later backups are
/// no-ops, so update magnitudes never grow.
#[test]
fn test_monte_carlo_update_magnitudes_shrink() {
    let mut trainer = MonteCarloTrainer::new(&deterministic_config());
    trainer.run_episode().unwrap();

    let steps = greedy_trajectory_states();
    let gamma = 0.99f64;

    let mut previous_delta = f64::INFINITY;
    for episode in 2..=5 {
        let before: Vec<f64> = steps
            .iter()
            .map(|&(state, action, _)| trainer.table().value(state, action))
            .collect();
        trainer.run_episode().unwrap();

        let delta: f64 = steps
            .iter()
            .zip(&before)
            .map(|(&(state, action, _), &b)| (trainer.table().value(state, action) - b).abs())
            .sum();
        assert!(
            delta <= previous_delta + 1e-12,
            "episode {episode} grew the update magnitude"
        );
        previous_delta = delta;
    }

    // Converged values are the discounted returns of the repeating episode.
    for (t, &(state, action, _)) in steps.iter().enumerate() {
        let expected = gamma.powi(6 - t as i32);
        assert!((trainer.table().value(state, action) - expected).abs() < 1e-9);
    }
}

/// Exploration decays multiplicatively toward the floor and never below
#[test]
fn test_epsilon_decay_respects_floor() {
    let config = TrainerConfig {
        epsilon: 1.0,
        epsilon_decay: 0.5,
        min_epsilon: 0.05,
        seed: Some(11),
        ..TrainerConfig::default()
    };
    let mut trainer = MonteCarloTrainer::new(&config);

    let mut last = trainer.epsilon();
    for _ in 0..20 {
        trainer.run_episode().unwrap();
        let current = trainer.epsilon();
        assert!(current <= last);
        assert!(current >= 0.05);
        last = current;
    }
    assert_eq!(last, 0.05);
}

/// Self-play training with exploration runs to completion and touches a
/// growing share of the state space.
#[test]
fn test_exploratory_training_expands_coverage() {
    let config = TrainerConfig {
        seed: Some(77),
        ..TrainerConfig::default()
    };
    let mut trainer = SarsaTrainer::new(&config);

    for _ in 0..50 {
        trainer.run_episode().unwrap();
    }
    let coverage_early = trainer.table().len();

    for _ in 0..200 {
        trainer.run_episode().unwrap();
    }
    assert!(trainer.table().len() > coverage_early);
}
