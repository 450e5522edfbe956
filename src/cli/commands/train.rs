//! Train command

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    board::Player,
    cli::{
        factory::{ReplayArg, StrategyKind, build_strategy},
        output::{print_result, print_section},
    },
    strategy::LearningStrategy,
    telemetry::{JsonlObserver, ProgressObserver},
    training::{Session, TrainingConfig},
};

#[derive(Parser, Debug)]
#[command(about = "Train two strategies against each other")]
pub struct TrainArgs {
    /// Strategy playing X
    #[arg(long, value_enum, default_value_t = StrategyKind::Learning)]
    pub x: StrategyKind,

    /// Strategy playing O
    #[arg(long, value_enum, default_value_t = StrategyKind::Learning)]
    pub o: StrategyKind,

    /// Number of training games
    #[arg(long, short = 'g', default_value_t = 5000)]
    pub games: usize,

    /// Every Nth game is a greedy test game (0 disables)
    #[arg(long, default_value_t = 250)]
    pub test_interval: usize,

    /// When buffered learning updates are applied
    #[arg(long, value_enum, default_value_t = ReplayArg::Delayed)]
    pub replay: ReplayArg,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write X's learned value table here after training
    #[arg(long)]
    pub x_table_out: Option<PathBuf>,

    /// Write O's learned value table here after training
    #[arg(long)]
    pub o_table_out: Option<PathBuf>,

    /// Stream per-episode records to this JSONL file
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Write a JSON summary of the session here
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let mut x = build_strategy(args.x, Player::X, args.seed, args.replay.into(), None)?;
    let mut o = build_strategy(
        args.o,
        Player::O,
        args.seed.map(|s| s.wrapping_add(1)),
        args.replay.into(),
        None,
    )?;

    let config = TrainingConfig {
        games: args.games,
        test_interval: args.test_interval,
        ..TrainingConfig::default()
    };

    let mut session = Session::new(config);
    if args.progress {
        session = session.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        session = session.with_observer(Box::new(JsonlObserver::new(path)?));
    }

    let result = session.run(x.as_mut(), o.as_mut())?;

    print_section("Training complete");
    print_result(&result);

    for (strategy, path) in [(&x, &args.x_table_out), (&o, &args.o_table_out)] {
        if let Some(path) = path {
            if let Some(learning) = strategy.as_any().downcast_ref::<LearningStrategy>() {
                learning.table().save(path)?;
                println!("wrote {} ({} states)", path.display(), learning.table().len());
            } else {
                eprintln!(
                    "Warning: {} requested but the strategy is not learning; skipped",
                    path.display()
                );
            }
        }
    }

    if let Some(path) = &args.summary {
        result.save(path)?;
    }

    Ok(())
}
