//! Tic-tac-toe strategy engine
//!
//! This crate provides:
//! - Complete board rules with value-semantics move application
//! - Symmetry reduction collapsing each board into one of 8 orientations
//! - Exhaustive minimax search with uniform-random tie-breaking
//! - Tabular Q-learning keyed by canonical states
//! - A reward-driven turn engine uniform over pluggable strategies

pub mod board;
pub mod cli;
pub mod engine;
pub mod error;
pub mod lines;
pub mod minimax;
pub mod qlearning;
pub mod render;
pub mod strategy;
pub mod symmetry;
pub mod telemetry;
pub mod training;

pub use board::{BoardState, Cell, Player};
pub use engine::{GameResult, MatchRecord, TurnEngine, rewards};
pub use error::{Error, Result};
pub use minimax::MinimaxSolver;
pub use qlearning::{AlphaSchedule, LearnerConfig, QLearner, ReplayMode, Step, ValueTable};
pub use strategy::{
    HeuristicStrategy, HumanStrategy, LearningStrategy, MinimaxStrategy, RandomStrategy, Strategy,
};
pub use symmetry::{CanonicalForm, Transform};
pub use training::{Session, TrainingConfig, TrainingResult};
