//! CLI infrastructure
//!
//! Command definitions for training, evaluating, and playing against the
//! engine's strategies.

pub mod commands;
pub mod factory;
pub mod output;
