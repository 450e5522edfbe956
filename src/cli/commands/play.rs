//! Play command

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    board::Player,
    cli::factory::{StrategyKind, build_strategy, parse_player_token},
    engine::{GameResult, TurnEngine},
    qlearning::ReplayMode,
    render::format_board,
    strategy::HumanStrategy,
};

#[derive(Parser, Debug)]
#[command(about = "Play an interactive game against a strategy")]
pub struct PlayArgs {
    /// Mark the human controls (`x` or `o`)
    #[arg(long, default_value = "x")]
    pub mark: String,

    /// Opponent strategy
    #[arg(long, value_enum, default_value_t = StrategyKind::Minimax)]
    pub opponent: StrategyKind,

    /// Random seed for the opponent
    #[arg(long)]
    pub seed: Option<u64>,

    /// Load a trained value table for a learning opponent
    #[arg(long)]
    pub table: Option<PathBuf>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let human_mark = parse_player_token(&args.mark, "--mark")?;
    let mut human: Box<dyn crate::strategy::Strategy> = Box::new(HumanStrategy::new(human_mark));
    let mut opponent = build_strategy(
        args.opponent,
        human_mark.opponent(),
        args.seed,
        ReplayMode::Delayed,
        args.table.as_deref(),
    )?;

    let (x, o) = match human_mark {
        Player::X => (human.as_mut(), opponent.as_mut()),
        Player::O => (opponent.as_mut(), human.as_mut()),
    };

    let record = TurnEngine::new(x, o).play(true)?;

    println!("\n{}", format_board(&record.final_board));
    match record.result {
        GameResult::Win(player) => println!("{player} wins."),
        GameResult::Tie => println!("Tie game."),
        GameResult::Forfeit(player) => println!("{player} forfeits on an illegal move."),
    }

    Ok(())
}
