//! The game itself: board, turn, scoreboard and the computer's pending reply.
//!
//! Every input goes through [`Game`] and is applied to completion before the
//! call returns. Moves that are not allowed leave the state untouched and come
//! back as an [`Error`] the caller is free to ignore.

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument};

use crate::{
    advisor::MoveAdvisor,
    board::{Board, Mark, Outcome},
    command::Command,
    config::{GameConfig, Mode, Strategy},
    schedule::{Scheduler, TaskHandle},
    Error,
};

/// The side the advisor plays in [`Mode::HumanVsComputer`].
pub const COMPUTER: Mark = Mark::O;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreTally {
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
}

impl ScoreTally {
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x_wins,
            Mark::O => self.o_wins,
        }
    }

    pub fn games(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Won { mark: Mark::X, .. } => self.x_wins += 1,
            Outcome::Won { mark: Mark::O, .. } => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => {}
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    turn: Mark,
    outcome: Outcome,
    mode: Mode,
}

impl GameState {
    pub fn new(mode: Mode) -> Self {
        Self {
            board: Board::new(),
            turn: Mark::X,
            outcome: Outcome::InProgress,
            mode,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whose move it is, or whose move it was when the game ended.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        !self.outcome.is_terminal()
    }

    fn computer_to_move(&self) -> bool {
        self.mode.has_computer() && self.turn == COMPUTER
    }
}

/// What happens after a mark has been placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Next {
    /// A person plays `Mark` next.
    Human(Mark),
    /// The computer answers once the task is due.
    Computer(TaskHandle),
    /// The move ended the game.
    Finished(Outcome),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub index: usize,
    pub mark: Mark,
    pub next: Next,
    pub scores: ScoreTally,
}

#[derive(Debug)]
pub struct Game {
    state: GameState,
    scores: ScoreTally,
    config: GameConfig,
    advisor: Box<dyn MoveAdvisor>,
    /// Seeds the advisors built by `set_strategy`.
    reseed: ChaCha8Rng,
    scheduler: Scheduler,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let advisor = config.strategy.advisor(config.seed);
        Self::with_advisor(config, advisor)
    }

    pub fn with_advisor(config: GameConfig, advisor: Box<dyn MoveAdvisor>) -> Self {
        let reseed = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            state: GameState::new(config.mode),
            scores: ScoreTally::default(),
            config,
            advisor,
            reseed,
            scheduler: Scheduler::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scores(&self) -> ScoreTally {
        self.scores
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn pending_reply(&self) -> Option<TaskHandle> {
        self.scheduler.pending()
    }

    /// True when a cell selection from the UI would be accepted.
    pub fn is_human_turn(&self) -> bool {
        self.state.is_active()
            && !self.state.computer_to_move()
            && self.scheduler.pending().is_none()
    }

    pub fn apply_move(&mut self, index: usize) -> Result<MoveReport, Error> {
        self.apply_move_at(index, Instant::now())
    }

    /// Places the current player's mark for a human. `now` anchors the
    /// computer's reply delay.
    #[instrument(skip(self, now))]
    pub fn apply_move_at(&mut self, index: usize, now: Instant) -> Result<MoveReport, Error> {
        let rejected = if index >= 9 {
            Some(Error::InvalidIndex(index))
        } else if !self.state.is_active() {
            Some(Error::GameOver)
        } else if !self.is_human_turn() {
            Some(Error::NotYourTurn)
        } else if !self.state.board.is_valid_move(index) {
            Some(Error::InvalidMove(index))
        } else {
            None
        };
        if let Some(err) = rejected {
            debug!(%err, "ignoring move");
            return Err(err);
        }

        Ok(self.place(index, now))
    }

    /// Plays the computer's reply if it is due at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<MoveReport> {
        let handle = self.scheduler.take_due(now)?;
        debug!(?handle, "reply due");
        match self.computer_move(now) {
            Ok(report) => Some(report),
            Err(err) => {
                debug!(%err, "dropping reply");
                None
            }
        }
    }

    /// Plays the reply behind `handle` straight away. Handles cancelled by a
    /// reset or replaced by a later schedule are refused.
    #[instrument(skip(self))]
    pub fn run_reply(&mut self, handle: TaskHandle) -> Result<MoveReport, Error> {
        if !self.scheduler.take(handle) {
            debug!("stale reply");
            return Err(Error::StaleMove);
        }
        self.computer_move(Instant::now())
    }

    fn computer_move(&mut self, now: Instant) -> Result<MoveReport, Error> {
        if !self.state.is_active() {
            return Err(Error::GameOver);
        }
        if !self.state.computer_to_move() {
            return Err(Error::NotYourTurn);
        }
        let index = self
            .advisor
            .choose_move(&self.state.board, COMPUTER)
            .filter(|index| self.state.board.is_valid_move(*index))
            .ok_or(Error::GameOver)?;
        Ok(self.place(index, now))
    }

    fn place(&mut self, index: usize, now: Instant) -> MoveReport {
        let mark = self.state.turn;
        self.state.board = self.state.board.mark(index, mark);
        debug_assert!(self.state.board.is_balanced());

        let next = self.evaluate_termination(now);
        MoveReport {
            index,
            mark,
            next,
            scores: self.scores,
        }
    }

    fn evaluate_termination(&mut self, now: Instant) -> Next {
        let outcome = self.state.board.outcome();
        if outcome.is_terminal() {
            self.state.outcome = outcome;
            self.scores.record(outcome);
            info!(?outcome, scores = ?self.scores, "game over");
            return Next::Finished(outcome);
        }

        self.state.turn = self.state.turn.swap();
        if self.state.computer_to_move() {
            let handle = self.scheduler.schedule(now, self.config.reply_delay);
            Next::Computer(handle)
        } else {
            Next::Human(self.state.turn)
        }
    }

    /// Clears the board for a new game. Scores are kept.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        if let Some(handle) = self.scheduler.cancel() {
            debug!(?handle, "cancelled pending reply");
        }
        self.state = GameState::new(self.state.mode);
        info!(mode = ?self.state.mode, "new game");
    }

    pub fn reset_scores(&mut self) {
        self.scores = ScoreTally::default();
        info!("scores cleared");
    }

    /// Switches mode and starts a new game.
    pub fn set_mode(&mut self, mode: Mode) {
        self.state.mode = mode;
        self.config.mode = mode;
        self.reset();
    }

    /// Swaps the computer's advisor. The game in progress carries on.
    ///
    /// Each new advisor gets a fresh seed drawn from the game's own RNG, so a
    /// fixed config seed still yields a different sequence after every switch.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.config.strategy = strategy;
        self.advisor = strategy.advisor(Some(self.reseed.gen()));
    }

    pub fn handle(&mut self, command: Command) -> Result<Option<MoveReport>, Error> {
        self.handle_at(command, Instant::now())
    }

    /// Single entry point for UI events.
    pub fn handle_at(
        &mut self,
        command: Command,
        now: Instant,
    ) -> Result<Option<MoveReport>, Error> {
        match command {
            Command::Select(index) => self.apply_move_at(index, now).map(Some),
            Command::Reset => {
                self.reset();
                Ok(None)
            }
            Command::ResetScores => {
                self.reset_scores();
                Ok(None)
            }
            Command::SetMode(mode) => {
                self.set_mode(mode);
                Ok(None)
            }
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
