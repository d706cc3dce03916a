use std::num::ParseIntError;

use thiserror::Error;

pub mod advisor;
mod board;
pub mod cli;
pub mod command;
pub mod config;
pub mod engine;
pub mod present;
pub mod schedule;

pub use advisor::{HeuristicAdvisor, MoveAdvisor, RandomAdvisor};
pub use board::{Board, Mark, Outcome, CENTER, CORNERS, WIN_SEQUENCES};
pub use command::Command;
pub use config::{GameConfig, Mode, Strategy};
pub use engine::{Game, GameState, MoveReport, Next, ScoreTally, COMPUTER};
pub use present::Snapshot;
pub use schedule::TaskHandle;

/// Why an input was disregarded. None of these change the game.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    // Squares are shown to players counting from 1.
    #[error("invalid move: square {} is already taken!", .0 + 1)]
    InvalidMove(usize),

    #[error("invalid index: {0}!")]
    InvalidIndex(usize),

    #[error("invalid input: {0}!")]
    InvalidInteger(ParseIntError),

    #[error("unknown command: {0}!")]
    UnknownCommand(String),

    #[error("the game is over, reset to play again!")]
    GameOver,

    #[error("wait for your turn!")]
    NotYourTurn,

    #[error("computer move was cancelled")]
    StaleMove,
}
