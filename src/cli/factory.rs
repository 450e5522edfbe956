//! Construct strategies from command-line selections

use std::path::Path;

use anyhow::{Result, anyhow};
use clap::ValueEnum;

use crate::{
    board::Player,
    qlearning::{LearnerConfig, ReplayMode, ValueTable},
    strategy::{
        HeuristicStrategy, HumanStrategy, LearningStrategy, MinimaxStrategy, RandomStrategy,
        Strategy,
    },
};

/// Strategy selection on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyKind {
    Human,
    Random,
    Heuristic,
    Minimax,
    Learning,
}

/// When buffered learning updates are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReplayArg {
    Online,
    Delayed,
}

impl From<ReplayArg> for ReplayMode {
    fn from(arg: ReplayArg) -> Self {
        match arg {
            ReplayArg::Online => ReplayMode::Online,
            ReplayArg::Delayed => ReplayMode::Delayed,
        }
    }
}

pub fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" | "first" => Ok(Player::X),
        "o" | "second" => Ok(Player::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}

/// Build a strategy bound to `mark`.
///
/// `seed` makes stochastic strategies reproducible; `replay` and `table`
/// only affect learning strategies (a loaded table resumes a trained
/// policy).
pub fn build_strategy(
    kind: StrategyKind,
    mark: Player,
    seed: Option<u64>,
    replay: ReplayMode,
    table: Option<&Path>,
) -> Result<Box<dyn Strategy>> {
    let strategy: Box<dyn Strategy> = match kind {
        StrategyKind::Human => Box::new(HumanStrategy::new(mark)),
        StrategyKind::Random => Box::new(match seed {
            Some(seed) => RandomStrategy::with_seed(mark, seed),
            None => RandomStrategy::new(mark),
        }),
        StrategyKind::Heuristic => Box::new(match seed {
            Some(seed) => HeuristicStrategy::with_seed(mark, seed),
            None => HeuristicStrategy::new(mark),
        }),
        StrategyKind::Minimax => Box::new(match seed {
            Some(seed) => MinimaxStrategy::with_seed(mark, seed),
            None => MinimaxStrategy::new(mark),
        }),
        StrategyKind::Learning => {
            let mut config = match mark {
                Player::X => LearnerConfig::first_player(),
                Player::O => LearnerConfig::second_player(),
            }
            .with_replay(replay);
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }

            let mut strategy = LearningStrategy::new(mark, config);
            if let Some(path) = table {
                let table = ValueTable::load(path)
                    .map_err(|e| anyhow!("failed to load value table {}: {e}", path.display()))?;
                strategy = strategy.with_table(table);
            }
            Box::new(strategy)
        }
    };

    Ok(strategy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_player_token() {
        assert_eq!(parse_player_token("x", "--mark").unwrap(), Player::X);
        assert_eq!(parse_player_token("O", "--mark").unwrap(), Player::O);
        assert_eq!(parse_player_token("first", "--mark").unwrap(), Player::X);
        assert!(parse_player_token("z", "--mark").is_err());
    }

    #[test]
    fn test_build_non_learning_strategies() {
        for kind in [
            StrategyKind::Random,
            StrategyKind::Heuristic,
            StrategyKind::Minimax,
        ] {
            let strategy =
                build_strategy(kind, Player::X, Some(9), ReplayMode::Delayed, None).unwrap();
            assert_eq!(strategy.mark(), Player::X);
        }
    }
}
