//! Command line options shared by the front ends.

use std::time::Duration;

use clap::Args;
use tracing_subscriber::EnvFilter;

use crate::config::{GameConfig, Mode, Strategy, DEFAULT_REPLY_DELAY};

#[derive(Args, Clone, Debug)]
pub struct GameArgs {
    /// Who plays O.
    #[arg(long, value_enum, default_value_t = Mode::HumanVsComputer)]
    pub mode: Mode,

    /// How the computer picks its squares.
    #[arg(long, value_enum, default_value_t = Strategy::Heuristic)]
    pub strategy: Strategy,

    /// Milliseconds before the computer answers.
    #[arg(long, default_value_t = DEFAULT_REPLY_DELAY.as_millis() as u64)]
    pub delay_ms: u64,

    /// Seed for the computer's random choices.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl GameArgs {
    pub fn config(&self) -> GameConfig {
        let config = GameConfig::default()
            .with_mode(self.mode)
            .with_strategy(self.strategy)
            .with_reply_delay(Duration::from_millis(self.delay_ms));
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

/// `RUST_LOG` wins; otherwise warnings only.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        game: GameArgs,
    }

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["ttt"]);
        assert_eq!(cli.game.config(), GameConfig::default());
    }

    #[test]
    fn every_option() {
        let cli = Cli::parse_from([
            "ttt",
            "--mode",
            "pvp",
            "--strategy",
            "random",
            "--delay-ms",
            "0",
            "--seed",
            "12",
        ]);
        let config = cli.game.config();
        assert_eq!(config.mode, Mode::HumanVsHuman);
        assert_eq!(config.strategy, Strategy::Random);
        assert_eq!(config.reply_delay, Duration::ZERO);
        assert_eq!(config.seed, Some(12));
    }
}
