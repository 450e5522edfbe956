//! Temporal-difference learner over canonical states

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    board::BoardState,
    error::{Error, Result},
    qlearning::table::ValueTable,
};

/// Learning-rate schedule: geometric decay toward a small floor.
///
/// `alpha(n) = clamp(decay^n, floor, ceiling)` where `n` is the learner's
/// game counter. The two players typically use different schedules because
/// they may train on different shares of the total budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlphaSchedule {
    pub ceiling: f64,
    pub decay: f64,
    pub floor: f64,
}

impl AlphaSchedule {
    pub fn new(ceiling: f64, decay: f64, floor: f64) -> Self {
        Self {
            ceiling,
            decay,
            floor,
        }
    }

    /// Default schedule for the opening player
    pub fn first_player() -> Self {
        Self::new(0.5, 0.9995, 0.01)
    }

    /// Default schedule for the replying player: higher ceiling, faster
    /// decay
    pub fn second_player() -> Self {
        Self::new(0.75, 0.999, 0.01)
    }

    /// Learning rate for the given game index
    pub fn alpha(&self, game: u64) -> f64 {
        self.decay.powf(game as f64).clamp(self.floor, self.ceiling)
    }
}

/// When buffered episode updates are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplayMode {
    /// Update each step as soon as its reward is known
    Online,
    /// Buffer the episode and replay it in reverse chronological order at
    /// the end, so the terminal reward propagates backward through the
    /// whole trajectory first
    Delayed,
}

/// Per-player learner parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearnerConfig {
    pub alpha: AlphaSchedule,
    pub gamma: f64,
    pub replay: ReplayMode,
    pub seed: Option<u64>,
}

impl LearnerConfig {
    /// Defaults for the side that opens the game
    pub fn first_player() -> Self {
        Self {
            alpha: AlphaSchedule::first_player(),
            gamma: 0.9,
            replay: ReplayMode::Delayed,
            seed: None,
        }
    }

    /// Defaults for the replying side
    pub fn second_player() -> Self {
        Self {
            alpha: AlphaSchedule::second_player(),
            gamma: 0.95,
            replay: ReplayMode::Delayed,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_replay(mut self, replay: ReplayMode) -> Self {
        self.replay = replay;
        self
    }
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self::first_player()
    }
}

/// One step of an episode trace
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub before: BoardState,
    pub action: usize,
    pub reward: f64,
    pub after: BoardState,
    pub terminal: bool,
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular Q-learner.
///
/// Owns exactly one [`ValueTable`], a monotonically increasing game
/// counter feeding the alpha schedule, and the exploration RNG. Both move
/// selection and updates operate in the canonical frame; moves cross the
/// boundary through the symmetry move mapping, never raw indices.
#[derive(Debug, Clone)]
pub struct QLearner {
    table: ValueTable,
    config: LearnerConfig,
    games: u64,
    rng: StdRng,
}

impl QLearner {
    pub fn new(config: LearnerConfig) -> Self {
        Self {
            table: ValueTable::new(),
            config,
            games: 0,
            rng: build_rng(config.seed),
        }
    }

    /// Replace the table, e.g. with one loaded from disk
    pub fn with_table(mut self, table: ValueTable) -> Self {
        self.table = table;
        self
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    pub fn into_table(self) -> ValueTable {
        self.table
    }

    /// Episodes completed so far
    pub fn games(&self) -> u64 {
        self.games
    }

    /// Current learning rate under the schedule
    pub fn alpha(&self) -> f64 {
        self.config.alpha.alpha(self.games)
    }

    pub fn gamma(&self) -> f64 {
        self.config.gamma
    }

    pub fn replay_mode(&self) -> ReplayMode {
        self.config.replay
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Choose a move for `board`.
    ///
    /// Training games explore: uniform choice among the canonical board's
    /// legal moves. Test games exploit: the highest-valued legal move of
    /// the canonical row (materialized zeroed for unseen states), value
    /// ties broken by lowest move index. Either way the choice is mapped
    /// back into the caller's orientation before it is returned.
    pub fn select_move(&mut self, board: &BoardState, is_test: bool) -> Result<usize> {
        let canonical = board.canonical();
        let legal = canonical.board.legal_moves();
        if legal.is_empty() {
            return Err(Error::NoValidMoves);
        }

        let chosen = if is_test {
            self.table.ensure_row(&canonical.key);
            self.table
                .greedy(&canonical.key, &legal)
                .ok_or(Error::NoValidMoves)?
        } else {
            *legal.choose(&mut self.rng).ok_or(Error::NoValidMoves)?
        };

        Ok(canonical.from_canonical(chosen))
    }

    /// Temporal-difference update.
    ///
    /// `target = reward` when terminal, else
    /// `reward + gamma * max(row(canonical(after)))`, and the stored value
    /// moves to the convex blend
    /// `(1 - alpha) * old + alpha * target`. Both boards are canonicalized
    /// and the action index is mapped into the canonical frame of `before`,
    /// because the table is keyed by canonical states.
    pub fn update(
        &mut self,
        before: &BoardState,
        action: usize,
        reward: f64,
        after: &BoardState,
        terminal: bool,
        alpha: f64,
        gamma: f64,
    ) {
        let target = if terminal {
            reward
        } else {
            reward + gamma * self.table.row_max(&after.canonical().key)
        };

        let canonical = before.canonical();
        let canonical_action = canonical.to_canonical(action);
        let row = self.table.row_mut(&canonical.key);
        row[canonical_action] = (1.0 - alpha) * row[canonical_action] + alpha * target;
    }

    /// Apply a recorded step under the current schedule
    pub fn apply_step(&mut self, step: &Step) {
        let alpha = self.alpha();
        let gamma = self.gamma();
        self.update(
            &step.before,
            step.action,
            step.reward,
            &step.after,
            step.terminal,
            alpha,
            gamma,
        );
    }

    /// Advance the game counter after an episode
    pub fn finish_episode(&mut self) {
        self.games += 1;
    }
}
