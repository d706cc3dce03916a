//! What a front end shows, derived from the engine's state.

use std::fmt;

use crate::{
    board::{Mark, Outcome},
    config::Mode,
    engine::{Game, GameState, ScoreTally, COMPUTER},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub squares: [Option<Mark>; 9],
    pub status: String,
    /// The winning line, if the game was won.
    pub highlight: Option<[usize; 3]>,
    /// The side whose score box is lit while the game runs.
    pub active_side: Option<Mark>,
    pub scores: ScoreTally,
    pub mode: Mode,
}

impl Snapshot {
    pub fn of(game: &Game) -> Self {
        let state = game.state();
        let highlight = match state.outcome() {
            Outcome::Won { line, .. } => Some(line),
            _ => None,
        };
        let active_side = state.is_active().then(|| state.turn());

        Snapshot {
            squares: *state.board().squares(),
            status: status_line(state),
            highlight,
            active_side,
            scores: game.scores(),
            mode: state.mode(),
        }
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlight.map_or(false, |line| line.contains(&index))
    }
}

pub fn status_line(state: &GameState) -> String {
    let vs_computer = state.mode().has_computer();
    match state.outcome() {
        Outcome::InProgress if vs_computer => {
            if state.turn() == COMPUTER {
                "Computer Thinking...".to_string()
            } else {
                "Your Turn".to_string()
            }
        }
        Outcome::InProgress => format!("Player {}'s Turn", state.turn()),
        Outcome::Won { mark, .. } if vs_computer => {
            if mark == COMPUTER {
                "Computer Wins!".to_string()
            } else {
                "You Win!".to_string()
            }
        }
        Outcome::Won { mark, .. } => format!("Player {} Wins!", mark),
        Outcome::Draw => "Draw!".to_string(),
    }
}

impl fmt::Display for ScoreTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X: {}  O: {}  Draw: {}",
            self.x_wins, self.o_wins, self.draws
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::{advisor::MoveAdvisor, board::Board, config::GameConfig};

    fn game(mode: Mode) -> Game {
        Game::new(GameConfig::default().with_mode(mode).with_seed(5))
    }

    #[test]
    fn two_player_status() {
        let mut game = game(Mode::HumanVsHuman);
        assert_eq!(Snapshot::of(&game).status, "Player X's Turn");
        game.apply_move(0).unwrap();
        let snapshot = Snapshot::of(&game);
        assert_eq!(snapshot.status, "Player O's Turn");
        assert_eq!(snapshot.active_side, Some(Mark::O));
    }

    #[test]
    fn two_player_win_is_highlighted() {
        let mut game = game(Mode::HumanVsHuman);
        for index in [0, 3, 4, 5, 8] {
            game.apply_move(index).unwrap();
        }
        let snapshot = Snapshot::of(&game);
        assert_eq!(snapshot.status, "Player X Wins!");
        assert_eq!(snapshot.highlight, Some([0, 4, 8]));
        assert!(snapshot.is_highlighted(4));
        assert!(!snapshot.is_highlighted(3));
        assert_eq!(snapshot.active_side, None);
        assert_eq!(snapshot.scores.to_string(), "X: 1  O: 0  Draw: 0");
    }

    #[test]
    fn computer_mode_status() {
        let mut game = game(Mode::HumanVsComputer);
        assert_eq!(Snapshot::of(&game).status, "Your Turn");

        let now = Instant::now();
        game.apply_move_at(0, now).unwrap();
        assert_eq!(Snapshot::of(&game).status, "Computer Thinking...");
    }

    #[test]
    fn computer_win_status() {
        let mut game = game(Mode::HumanVsComputer);
        let mut now = Instant::now();
        // O takes the center, then a corner, then completes the diagonal.
        for index in [1, 7, 3] {
            game.apply_move_at(index, now).unwrap();
            now += game.config().reply_delay;
            game.poll(now).unwrap();
        }
        assert!(matches!(
            game.state().outcome(),
            Outcome::Won { mark: Mark::O, .. }
        ));
        assert_eq!(Snapshot::of(&game).status, "Computer Wins!");
    }

    #[derive(Debug)]
    struct Scripted(Vec<usize>);

    impl MoveAdvisor for Scripted {
        fn choose_move(&mut self, _board: &Board, _mark: Mark) -> Option<usize> {
            self.0.pop()
        }
    }

    #[test]
    fn human_win_status() {
        let config = GameConfig::default().with_reply_delay(Duration::ZERO);
        let mut game = Game::with_advisor(config, Box::new(Scripted(vec![4, 3])));
        let now = Instant::now();
        for index in [0, 1, 2] {
            game.apply_move_at(index, now).unwrap();
            game.poll(now);
        }
        assert_eq!(Snapshot::of(&game).status, "You Win!");
        assert_eq!(Snapshot::of(&game).scores.x_wins, 1);
    }

    #[test]
    fn draw_status() {
        let mut game = game(Mode::HumanVsHuman);
        for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            game.apply_move(index).unwrap();
        }
        assert_eq!(Snapshot::of(&game).status, "Draw!");
    }
}
