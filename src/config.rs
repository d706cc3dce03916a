use std::{fmt, time::Duration};

use clap::ValueEnum;

/// The delay before the computer answers, long enough to read the board.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(600);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Two people share the board.
    #[value(name = "pvp")]
    HumanVsHuman,
    /// X is the human, O is played by the move advisor.
    #[default]
    #[value(name = "ai")]
    HumanVsComputer,
}

impl Mode {
    pub fn toggle(&self) -> Mode {
        match self {
            Mode::HumanVsHuman => Mode::HumanVsComputer,
            Mode::HumanVsComputer => Mode::HumanVsHuman,
        }
    }

    pub fn has_computer(&self) -> bool {
        matches!(self, Mode::HumanVsComputer)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::HumanVsHuman => f.write_str("Player vs Player"),
            Mode::HumanVsComputer => f.write_str("Player vs Computer"),
        }
    }
}

/// How the computer picks its squares.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Win, block, center, corner, anything.
    #[default]
    Heuristic,
    /// Any empty square, uniformly.
    Random,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub mode: Mode,
    pub strategy: Strategy,
    pub reply_delay: Duration,
    /// Seed for the advisor's RNG. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            strategy: Strategy::default(),
            reply_delay: DEFAULT_REPLY_DELAY,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_browser_game() {
        let config = GameConfig::default();
        assert_eq!(config.mode, Mode::HumanVsComputer);
        assert_eq!(config.strategy, Strategy::Heuristic);
        assert_eq!(config.reply_delay, Duration::from_millis(600));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn builder_overrides_fields() {
        let config = GameConfig::default()
            .with_mode(Mode::HumanVsHuman)
            .with_strategy(Strategy::Random)
            .with_reply_delay(Duration::ZERO)
            .with_seed(7);
        assert_eq!(config.mode, Mode::HumanVsHuman);
        assert_eq!(config.strategy, Strategy::Random);
        assert_eq!(config.reply_delay, Duration::ZERO);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn mode_names_parse() {
        assert_eq!(Mode::from_str("pvp", true), Ok(Mode::HumanVsHuman));
        assert_eq!(Mode::from_str("ai", true), Ok(Mode::HumanVsComputer));
        assert_eq!(Strategy::from_str("random", true), Ok(Strategy::Random));
    }
}
