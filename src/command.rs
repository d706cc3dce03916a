use std::str::FromStr;

use clap::ValueEnum;

use crate::{config::Mode, Error};

/// Input events the engine understands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Play a square, 0 to 8.
    Select(usize),
    Reset,
    ResetScores,
    SetMode(Mode),
}

/// Reads a square the way players type it: 1 to 9, left to right, top to bottom.
pub fn parse_square(input: &str) -> Result<usize, Error> {
    let number = input.trim().parse::<usize>().map_err(Error::InvalidInteger)?;
    if (1..=9).contains(&number) {
        Ok(number - 1)
    } else {
        Err(Error::InvalidIndex(number))
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        match words.next() {
            Some("r" | "reset") => Ok(Command::Reset),
            Some("s" | "scores") => Ok(Command::ResetScores),
            Some("mode") => {
                let name = words.next().unwrap_or_default();
                <Mode as ValueEnum>::from_str(name, true)
                    .map(Command::SetMode)
                    .map_err(|_| Error::UnknownCommand(line.to_string()))
            }
            _ => parse_square(line).map(Command::Select),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squares_are_one_based() {
        assert_eq!("1".parse::<Command>(), Ok(Command::Select(0)));
        assert_eq!(" 9 \n".parse::<Command>(), Ok(Command::Select(8)));
    }

    #[test]
    fn out_of_range_square() {
        assert_eq!("0".parse::<Command>(), Err(Error::InvalidIndex(0)));
        assert_eq!("10".parse::<Command>(), Err(Error::InvalidIndex(10)));
    }

    #[test]
    fn garbage_is_invalid_input() {
        assert!(matches!(
            "hello".parse::<Command>(),
            Err(Error::InvalidInteger(_))
        ));
    }

    #[test]
    fn keywords() {
        assert_eq!("r".parse::<Command>(), Ok(Command::Reset));
        assert_eq!("scores".parse::<Command>(), Ok(Command::ResetScores));
        assert_eq!("mode pvp".parse::<Command>(), Ok(Command::SetMode(Mode::HumanVsHuman)));
        assert_eq!("mode AI".parse::<Command>(), Ok(Command::SetMode(Mode::HumanVsComputer)));
        assert_eq!(
            "mode chess".parse::<Command>(),
            Err(Error::UnknownCommand("mode chess".to_string()))
        );
    }
}
