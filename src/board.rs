use std::fmt;

/// Every line that wins the game, as board indices.
pub const WIN_SEQUENCES: [[usize; 3]; 8] = [
    // Horizontal
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Vertical
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonal
    [0, 4, 8],
    [2, 4, 6],
];

pub const CENTER: usize = 4;
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn swap(&self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => f.write_str("X"),
            Mark::O => f.write_str("O"),
        }
    }
}

/// Where a board stands after the last mark was placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won { mark: Mark, line: [usize; 3] },
    Draw,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// Nine squares in row-major order, top left is 0.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Mark>; 9],
}

impl Board {
    pub fn new() -> Self {
        let squares = [None; 9];
        Self { squares }
    }

    /// Builds a board from explicit squares. Used by tests and replays.
    pub fn from_squares(squares: [Option<Mark>; 9]) -> Self {
        Self { squares }
    }

    pub fn mark(&self, index: usize, mark: Mark) -> Board {
        let mut new_board = *self;
        new_board.squares[index] = Some(mark);
        new_board
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.squares.get(index).copied().flatten()
    }

    pub fn squares(&self) -> &[Option<Mark>; 9] {
        &self.squares
    }

    fn display_squares(&self) -> [&'static str; 9] {
        let mut display = [""; 9];
        for (dsquare, square) in display.iter_mut().zip(self.squares.iter()) {
            match square {
                Some(Mark::X) => *dsquare = "X",
                Some(Mark::O) => *dsquare = "O",
                None => *dsquare = " ",
            }
        }
        display
    }

    /// True when `index` is on the board and nobody has played there.
    pub fn is_valid_move(&self, index: usize) -> bool {
        matches!(self.squares.get(index), Some(None))
    }

    pub fn empty_squares(&self) -> impl Iterator<Item = usize> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, square)| square.is_none())
            .map(|(index, _)| index)
    }

    pub fn is_full(&self) -> bool {
        self.squares.iter().all(Option::is_some)
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.squares.iter().filter(|sq| **sq == Some(mark)).count()
    }

    /// Marks alternate starting with X, so X leads by at most one.
    pub fn is_balanced(&self) -> bool {
        let x = self.count(Mark::X);
        let o = self.count(Mark::O);
        x == o || x == o + 1
    }

    /// The first line (in [`WIN_SEQUENCES`] order) held entirely by one mark.
    pub fn winning_line(&self) -> Option<(Mark, [usize; 3])> {
        for seq in WIN_SEQUENCES {
            let first = self.squares[seq[0]];
            if let Some(mark) = first {
                if seq.iter().map(|i| self.squares[*i]).all(|x| x == first) {
                    return Some((mark, seq));
                }
            }
        }
        None
    }

    pub fn get_winner(&self) -> Option<Mark> {
        self.winning_line().map(|(mark, _)| mark)
    }

    pub fn outcome(&self) -> Outcome {
        match self.winning_line() {
            Some((mark, line)) => Outcome::Won { mark, line },
            None if self.is_full() => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ds = self.display_squares();
        writeln!(f, " {} | {} | {}", ds[0], ds[1], ds[2])?;
        f.write_str("---+---+---\n")?;
        writeln!(f, " {} | {} | {}", ds[3], ds[4], ds[5])?;
        f.write_str("---+---+---\n")?;
        writeln!(f, " {} | {} | {}", ds[6], ds[7], ds[8])?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn board_from(cells: &str) -> Board {
    let mut squares = [None; 9];
    for (square, c) in squares.iter_mut().zip(cells.chars()) {
        *square = match c {
            'X' => Some(Mark::X),
            'O' => Some(Mark::O),
            _ => None,
        };
    }
    Board::from_squares(squares)
}
