//! Training telemetry
//!
//! Observers allow composable data collection during training without
//! coupling the session loop to specific output formats. Records are plain
//! serializable values so external tooling can plot them; the plotting
//! itself stays outside this crate.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    board::Player,
    engine::{GameResult, rewards},
    error::Result,
};

/// Per-episode outcome record emitted for external plotting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub game: usize,
    pub result: GameResult,
    pub x_reward: f64,
    pub o_reward: f64,
    /// Moving average of X's game rewards over test games
    pub x_average: f64,
    /// Moving average of O's game rewards over test games
    pub o_average: f64,
    pub is_test: bool,
}

/// Exponential-window moving average of game rewards.
///
/// `avg <- (avg * (c - 1) + sample) / c`, started at the loss reward so
/// early averages understate rather than flatter the policy.
#[derive(Debug, Clone, Copy)]
pub struct MovingAverage {
    coefficient: f64,
    value: f64,
}

impl MovingAverage {
    pub fn new(coefficient: f64) -> Self {
        Self {
            coefficient,
            value: rewards::LOSS,
        }
    }

    pub fn push(&mut self, sample: f64) -> f64 {
        self.value = (self.value * (self.coefficient - 1.0) + sample) / self.coefficient;
        self.value
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Observer of a training session
pub trait Observer {
    fn on_training_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    fn on_game_end(&mut self, _record: &EpisodeRecord) -> Result<()> {
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Progress bar observer showing W/D/L from X's perspective
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    draws: usize,
    losses: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, record: &EpisodeRecord) -> Result<()> {
        match record.result.winner() {
            Some(Player::X) => self.wins += 1,
            Some(Player::O) => self.losses += 1,
            None => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(record.game as u64 + 1);
            pb.set_message(format!("{} D:{} L:{}", self.wins, self.draws, self.losses));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("{} D:{} L:{}", self.wins, self.draws, self.losses));
        }
        Ok(())
    }
}

/// JSONL observer: one episode record per line
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_game_end(&mut self, record: &EpisodeRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_average_converges_toward_samples() {
        let mut avg = MovingAverage::new(10.0);
        assert_eq!(avg.value(), rewards::LOSS);

        for _ in 0..200 {
            avg.push(rewards::WIN);
        }
        assert!((avg.value() - rewards::WIN).abs() < 1.0);
    }

    #[test]
    fn test_moving_average_single_step() {
        let mut avg = MovingAverage::new(50.0);
        let updated = avg.push(0.0);
        // (-100 * 49 + 0) / 50 = -98
        assert!((updated + 98.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_observer_counts_outcomes() {
        let mut observer = ProgressObserver::new();
        let record = |game, result| EpisodeRecord {
            game,
            result,
            x_reward: 0.0,
            o_reward: 0.0,
            x_average: 0.0,
            o_average: 0.0,
            is_test: false,
        };

        observer
            .on_game_end(&record(0, GameResult::Win(Player::X)))
            .unwrap();
        observer.on_game_end(&record(1, GameResult::Tie)).unwrap();
        observer
            .on_game_end(&record(2, GameResult::Forfeit(Player::X)))
            .unwrap();

        assert_eq!(observer.wins, 1);
        assert_eq!(observer.draws, 1);
        assert_eq!(observer.losses, 1);
    }
}
