//! Training session loop

use serde::{Deserialize, Serialize};

use crate::{
    board::Player,
    engine::{GameResult, TurnEngine},
    error::Result,
    strategy::Strategy,
    telemetry::{EpisodeRecord, MovingAverage, Observer},
};

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of games to play
    pub games: usize,

    /// Every `test_interval`-th game is played greedily (no exploration);
    /// zero disables interval testing
    pub test_interval: usize,

    /// The final games of the run are all test games
    pub final_test_games: usize,

    /// Moving-average window coefficient for X's test-game rewards
    pub x_average_window: f64,

    /// Moving-average window coefficient for O's test-game rewards
    pub o_average_window: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            games: 5000,
            test_interval: 250,
            final_test_games: 10,
            x_average_window: 50.0,
            o_average_window: 100.0,
        }
    }
}

/// Totals for a finished session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    pub total_games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub ties: usize,
    pub forfeits: usize,
    pub x_win_rate: f64,
    pub o_win_rate: f64,
    pub tie_rate: f64,
    pub final_x_average: f64,
    pub final_o_average: f64,
}

impl TrainingResult {
    fn rate(count: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        }
    }

    pub fn new(
        total_games: usize,
        x_wins: usize,
        o_wins: usize,
        ties: usize,
        forfeits: usize,
        final_x_average: f64,
        final_o_average: f64,
    ) -> Self {
        Self {
            total_games,
            x_wins,
            o_wins,
            ties,
            forfeits,
            x_win_rate: Self::rate(x_wins, total_games),
            o_win_rate: Self::rate(o_wins, total_games),
            tie_rate: Self::rate(ties, total_games),
            final_x_average,
            final_o_average,
        }
    }

    /// Save the result as pretty-printed JSON
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Drives repeated games between two strategies, scheduling test games and
/// feeding observers. Strategies learn (or not) through their own
/// `final_reward` hooks; the session never touches their internals.
pub struct Session {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl Session {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the session
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Test games exploit the learned policy: every `test_interval`-th game
    /// plus the final stretch of the run.
    fn is_test_game(&self, game: usize) -> bool {
        let interval_hit =
            self.config.test_interval != 0 && game.is_multiple_of(self.config.test_interval);
        interval_hit || game + self.config.final_test_games >= self.config.games
    }

    /// Run the configured number of games
    pub fn run(&mut self, x: &mut dyn Strategy, o: &mut dyn Strategy) -> Result<TrainingResult> {
        for observer in &mut self.observers {
            observer.on_training_start(self.config.games)?;
        }

        let mut x_average = MovingAverage::new(self.config.x_average_window);
        let mut o_average = MovingAverage::new(self.config.o_average_window);
        let mut x_wins = 0;
        let mut o_wins = 0;
        let mut ties = 0;
        let mut forfeits = 0;

        for game in 0..self.config.games {
            let is_test = self.is_test_game(game);
            let record = TurnEngine::new(x, o).play(is_test)?;

            match record.result.winner() {
                Some(Player::X) => x_wins += 1,
                Some(Player::O) => o_wins += 1,
                None => ties += 1,
            }
            if matches!(record.result, GameResult::Forfeit(_)) {
                forfeits += 1;
            }

            if is_test {
                x_average.push(record.x_reward);
                o_average.push(record.o_reward);
            }

            let episode = EpisodeRecord {
                game,
                result: record.result,
                x_reward: record.x_reward,
                o_reward: record.o_reward,
                x_average: x_average.value(),
                o_average: o_average.value(),
                is_test,
            };
            for observer in &mut self.observers {
                observer.on_game_end(&episode)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(
            self.config.games,
            x_wins,
            o_wins,
            ties,
            forfeits,
            x_average.value(),
            o_average.value(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::RandomStrategy;

    #[test]
    fn test_session_counts_every_game() {
        let config = TrainingConfig {
            games: 20,
            test_interval: 5,
            final_test_games: 3,
            ..TrainingConfig::default()
        };

        let mut session = Session::new(config);
        let mut x = RandomStrategy::with_seed(Player::X, 42);
        let mut o = RandomStrategy::with_seed(Player::O, 43);

        let result = session.run(&mut x, &mut o).unwrap();
        assert_eq!(result.total_games, 20);
        assert_eq!(result.x_wins + result.o_wins + result.ties, 20);
        assert_eq!(result.forfeits, 0);
    }

    #[test]
    fn test_test_game_schedule() {
        let config = TrainingConfig {
            games: 100,
            test_interval: 25,
            final_test_games: 10,
            ..TrainingConfig::default()
        };
        let session = Session::new(config);

        assert!(session.is_test_game(0));
        assert!(session.is_test_game(25));
        assert!(!session.is_test_game(26));
        // The last ten games are all test games.
        for game in 90..100 {
            assert!(session.is_test_game(game));
        }
        assert!(!session.is_test_game(89));
    }

    #[test]
    fn test_rates_sum_to_one_without_forfeits() {
        let mut session = Session::new(TrainingConfig {
            games: 50,
            ..TrainingConfig::default()
        });
        let mut x = RandomStrategy::with_seed(Player::X, 1);
        let mut o = RandomStrategy::with_seed(Player::O, 2);

        let result = session.run(&mut x, &mut o).unwrap();
        let total = result.x_win_rate + result.o_win_rate + result.tie_rate;
        assert!((total - 1.0).abs() < 1e-9);
    }
}
