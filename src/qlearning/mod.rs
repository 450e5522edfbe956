//! Tabular Q-learning over canonical board states

pub mod learner;
pub mod table;

pub use learner::{AlphaSchedule, LearnerConfig, QLearner, ReplayMode, Step};
pub use table::ValueTable;
