//! Rock-Paper-Scissors moves and judging.

use crate::error::GameError;
use crate::protocol::Outcome;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A committed or revealed move.
///
/// Ordinal `0` is the unset sentinel and has no variant here; an unset move
/// is `Option<Move>::None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Move {
    Rock = 1,
    Paper = 2,
    Scissors = 3,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Wire ordinal (1 = Rock, 2 = Paper, 3 = Scissors)
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Decode a wire ordinal, rejecting the unset sentinel
    pub fn from_ordinal(ordinal: u8) -> Result<Self, GameError> {
        match ordinal {
            1 => Ok(Move::Rock),
            2 => Ok(Move::Paper),
            3 => Ok(Move::Scissors),
            other => Err(GameError::InvalidMove(other)),
        }
    }

    /// Check if this move beats the other
    pub fn beats(self, other: Move) -> bool {
        resolve(self, other) == Outcome::Player1Wins
    }
}

impl TryFrom<u8> for Move {
    type Error = GameError;

    fn try_from(ordinal: u8) -> Result<Self, Self::Error> {
        Move::from_ordinal(ordinal)
    }
}

impl FromStr for Move {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rock" => Ok(Move::Rock),
            "paper" => Ok(Move::Paper),
            "scissors" => Ok(Move::Scissors),
            _ => Err(GameError::UnknownMove(s.to_string())),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Rock => "Rock",
            Move::Paper => "Paper",
            Move::Scissors => "Scissors",
        };
        write!(f, "{}", name)
    }
}

/// Judge two revealed moves.
///
/// Player 1 wins iff `(move1 - move2) mod 3 == 1`, which encodes the cycle
/// Rock > Scissors > Paper > Rock.
pub fn resolve(move1: Move, move2: Move) -> Outcome {
    if move1 == move2 {
        return Outcome::Draw;
    }
    let diff = (i16::from(move1.ordinal()) - i16::from(move2.ordinal())).rem_euclid(3);
    if diff == 1 {
        Outcome::Player1Wins
    } else {
        Outcome::Player2Wins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rock_beats_scissors() {
        assert_eq!(resolve(Move::Rock, Move::Scissors), Outcome::Player1Wins);
        assert_eq!(resolve(Move::Scissors, Move::Rock), Outcome::Player2Wins);
    }

    #[test]
    fn test_scissors_beats_paper() {
        assert_eq!(resolve(Move::Scissors, Move::Paper), Outcome::Player1Wins);
        assert_eq!(resolve(Move::Paper, Move::Scissors), Outcome::Player2Wins);
    }

    #[test]
    fn test_paper_beats_rock() {
        assert_eq!(resolve(Move::Paper, Move::Rock), Outcome::Player1Wins);
        assert_eq!(resolve(Move::Rock, Move::Paper), Outcome::Player2Wins);
    }

    #[test]
    fn test_draws() {
        for mv in Move::ALL {
            assert_eq!(resolve(mv, mv), Outcome::Draw);
        }
    }

    #[test]
    fn test_all_outcomes() {
        let mut p1_wins = 0;
        let mut p2_wins = 0;
        let mut draws = 0;

        for a in Move::ALL {
            for b in Move::ALL {
                match resolve(a, b) {
                    Outcome::Player1Wins => p1_wins += 1,
                    Outcome::Player2Wins => p2_wins += 1,
                    Outcome::Draw => draws += 1,
                }
            }
        }

        assert_eq!(p1_wins, 3);
        assert_eq!(p2_wins, 3);
        assert_eq!(draws, 3);
    }

    #[test]
    fn test_beats() {
        assert!(Move::Rock.beats(Move::Scissors));
        assert!(!Move::Scissors.beats(Move::Rock));
        assert!(!Move::Paper.beats(Move::Paper));
    }

    #[test]
    fn test_ordinals() {
        assert_eq!(Move::Rock.ordinal(), 1);
        assert_eq!(Move::Paper.ordinal(), 2);
        assert_eq!(Move::Scissors.ordinal(), 3);

        for mv in Move::ALL {
            assert_eq!(Move::from_ordinal(mv.ordinal()).unwrap(), mv);
        }
    }

    #[test]
    fn test_unset_ordinal_rejected() {
        assert!(matches!(
            Move::from_ordinal(0),
            Err(GameError::InvalidMove(0))
        ));
        assert!(matches!(Move::try_from(4u8), Err(GameError::InvalidMove(4))));
    }

    #[test]
    fn test_parse_move() {
        assert_eq!("rock".parse::<Move>().unwrap(), Move::Rock);
        assert_eq!("Scissors".parse::<Move>().unwrap(), Move::Scissors);
        assert_eq!(
            "lizard".parse::<Move>(),
            Err(GameError::UnknownMove("lizard".to_string()))
        );
    }
}
