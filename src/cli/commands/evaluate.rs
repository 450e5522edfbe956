//! Evaluate command

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    board::Player,
    cli::{
        factory::{StrategyKind, build_strategy},
        output::{print_result, print_section},
    },
    qlearning::ReplayMode,
    telemetry::ProgressObserver,
    training::{Session, TrainingConfig},
};

#[derive(Parser, Debug)]
#[command(about = "Pit two strategies head-to-head with greedy play")]
pub struct EvaluateArgs {
    /// Strategy playing X
    #[arg(long, value_enum, default_value_t = StrategyKind::Minimax)]
    pub x: StrategyKind,

    /// Strategy playing O
    #[arg(long, value_enum, default_value_t = StrategyKind::Random)]
    pub o: StrategyKind,

    /// Number of evaluation games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Load a trained value table for X (learning strategies only)
    #[arg(long)]
    pub x_table: Option<PathBuf>,

    /// Load a trained value table for O (learning strategies only)
    #[arg(long)]
    pub o_table: Option<PathBuf>,

    /// Write a JSON summary of the evaluation here
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, default_value_t = false)]
    pub progress: bool,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let mut x = build_strategy(
        args.x,
        Player::X,
        args.seed,
        ReplayMode::Delayed,
        args.x_table.as_deref(),
    )?;
    let mut o = build_strategy(
        args.o,
        Player::O,
        args.seed.map(|s| s.wrapping_add(1)),
        ReplayMode::Delayed,
        args.o_table.as_deref(),
    )?;

    // Every game is a test game: learned policies play greedily throughout.
    let config = TrainingConfig {
        games: args.games,
        test_interval: 1,
        final_test_games: 0,
        ..TrainingConfig::default()
    };

    let mut session = Session::new(config);
    if args.progress {
        session = session.with_observer(Box::new(ProgressObserver::new()));
    }

    let result = session.run(x.as_mut(), o.as_mut())?;

    print_section(&format!("{} (X) vs {} (O)", x.name(), o.name()));
    print_result(&result);

    if let Some(path) = &args.summary {
        result.save(path)?;
    }

    Ok(())
}
