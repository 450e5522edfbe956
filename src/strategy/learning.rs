//! Reinforcement-learned play

use crate::{
    board::{BoardState, Player},
    error::Result,
    qlearning::{LearnerConfig, QLearner, ReplayMode, Step, ValueTable},
    strategy::Strategy,
};

/// Strategy backed by a [`QLearner`].
///
/// At each turn the pending (board, action) from the previous turn is
/// completed into a [`Step`] using the reward the engine just delivered and
/// the board now observed, then a fresh action is selected. `final_reward`
/// closes the episode: the last step carries the terminal reward, buffered
/// steps replay in reverse under [`ReplayMode::Delayed`], and the game
/// counter advances.
pub struct LearningStrategy {
    mark: Player,
    learner: QLearner,
    pending: Option<(BoardState, usize)>,
    trace: Vec<Step>,
}

impl LearningStrategy {
    pub fn new(mark: Player, config: LearnerConfig) -> Self {
        Self {
            mark,
            learner: QLearner::new(config),
            pending: None,
            trace: Vec::new(),
        }
    }

    /// Start from a previously trained table
    pub fn with_table(mut self, table: ValueTable) -> Self {
        self.learner = self.learner.with_table(table);
        self
    }

    pub fn learner(&self) -> &QLearner {
        &self.learner
    }

    pub fn table(&self) -> &ValueTable {
        self.learner.table()
    }

    pub fn into_table(self) -> ValueTable {
        self.learner.into_table()
    }

    fn record(&mut self, step: Step) {
        match self.learner.replay_mode() {
            ReplayMode::Online => self.learner.apply_step(&step),
            ReplayMode::Delayed => self.trace.push(step),
        }
    }
}

impl Strategy for LearningStrategy {
    fn mark(&self) -> Player {
        self.mark
    }

    fn make_move(&mut self, board: &BoardState, last_reward: f64, is_test: bool) -> Result<usize> {
        if let Some((before, action)) = self.pending.take() {
            self.record(Step {
                before,
                action,
                reward: last_reward,
                after: *board,
                terminal: false,
            });
        }

        let mv = self.learner.select_move(board, is_test)?;
        self.pending = Some((*board, mv));
        Ok(mv)
    }

    fn final_reward(&mut self, reward: f64) {
        if let Some((before, action)) = self.pending.take() {
            // On the forfeit path the recorded action is not applicable;
            // the terminal target never reads the after-state, so falling
            // back to `before` keeps the step well-formed.
            let after = before.apply(action, self.mark).unwrap_or(before);
            self.record(Step {
                before,
                action,
                reward,
                after,
                terminal: true,
            });
        }

        if self.learner.replay_mode() == ReplayMode::Delayed {
            while let Some(step) = self.trace.pop() {
                self.learner.apply_step(&step);
            }
        }

        self.learner.finish_episode();
    }

    fn reset(&mut self) {
        self.pending = None;
        self.trace.clear();
    }

    fn name(&self) -> &str {
        "Learning"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qlearning::AlphaSchedule;

    fn config(replay: ReplayMode) -> LearnerConfig {
        LearnerConfig {
            alpha: AlphaSchedule::new(0.5, 1.0, 0.01),
            gamma: 0.9,
            replay,
            seed: Some(17),
        }
    }

    fn board(s: &str) -> BoardState {
        s.parse().unwrap()
    }

    #[test]
    fn test_episode_advances_game_counter() {
        let mut strategy = LearningStrategy::new(Player::X, config(ReplayMode::Delayed));
        let mv = strategy.make_move(&BoardState::new(), 0.0, false).unwrap();
        assert!(BoardState::new().is_legal(mv));
        strategy.final_reward(100.0);
        assert_eq!(strategy.learner().games(), 1);
    }

    #[test]
    fn test_terminal_reward_reaches_the_table() {
        for replay in [ReplayMode::Online, ReplayMode::Delayed] {
            let mut strategy = LearningStrategy::new(Player::X, config(replay));
            let b = board("XX.OO....");
            let mv = strategy.make_move(&b, 0.0, false).unwrap();
            strategy.final_reward(100.0);

            let canonical = b.canonical();
            let value = strategy
                .table()
                .value(&canonical.key, canonical.to_canonical(mv));
            // alpha 0.5, old value 0, target 100
            assert!((value - 50.0).abs() < 1e-9, "value {value} for {replay:?}");
        }
    }

    #[test]
    fn test_intermediate_steps_complete_with_next_observation() {
        let mut strategy = LearningStrategy::new(Player::X, config(ReplayMode::Delayed));

        // Our move, the opponent's reply arrives with the next call.
        let first = BoardState::new();
        let mv1 = strategy.make_move(&first, 0.0, false).unwrap();
        let after_ours = first.play(mv1).unwrap();
        let after_theirs = after_ours.play(after_ours.legal_moves()[0]).unwrap();

        let _mv2 = strategy.make_move(&after_theirs, 1.0, false).unwrap();
        strategy.final_reward(-100.0);

        // Both steps were recorded and flushed.
        assert!(strategy.trace.is_empty());
        let opening = first.canonical();
        let opening_value = strategy
            .table()
            .value(&opening.key, opening.to_canonical(mv1));
        assert!(opening_value != 0.0, "opening step was never updated");
    }

    #[test]
    fn test_reset_clears_episode_state_but_not_table() {
        let mut strategy = LearningStrategy::new(Player::X, config(ReplayMode::Delayed));
        let mv = strategy.make_move(&BoardState::new(), 0.0, false).unwrap();
        assert!(mv < 9);
        strategy.reset();
        assert!(strategy.pending.is_none());

        // A finished episode leaves table rows behind; reset keeps them.
        let mv = strategy.make_move(&BoardState::new(), 0.0, false).unwrap();
        assert!(mv < 9);
        strategy.final_reward(100.0);
        let rows = strategy.table().len();
        assert!(rows > 0);
        strategy.reset();
        assert_eq!(strategy.table().len(), rows);
    }
}
