//! Protocol types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Seconds on the externally supplied clock
pub type Timestamp = u64;

/// Authenticated caller of an engine operation.
///
/// The host vouches for it; the engine only compares identities. Its bytes
/// go into every commitment, so a commitment belongs to one player, and the
/// ledger keys balances by it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(Uuid);

impl PlayerId {
    /// Fresh identity, for tests and demo wallets
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identity issued by the host
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Bytes bound into commitments
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for PlayerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of judging two moves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Player1Wins,
    Player2Wins,
    Draw,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Player1Wins => "player 1 wins",
            Outcome::Player2Wins => "player 2 wins",
            Outcome::Draw => "draw",
        }
    }

    /// The same result seen with the players swapped
    pub fn reversed(&self) -> Outcome {
        match self {
            Outcome::Player1Wins => Outcome::Player2Wins,
            Outcome::Player2Wins => Outcome::Player1Wins,
            Outcome::Draw => Outcome::Draw,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a game record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Player 1 has deposited and paid the fee
    Created,
    /// Player 2 has deposited, paid the fee and revealed their move
    SecondMoveSubmitted,
    Resolved,
    Refunded,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Resolved | GameStatus::Refunded)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameStatus::Created => "created",
            GameStatus::SecondMoveSubmitted => "second_move_submitted",
            GameStatus::Resolved => "resolved",
            GameStatus::Refunded => "refunded",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_generation() {
        assert_ne!(PlayerId::new(), PlayerId::new());
    }

    #[test]
    fn test_player_id_parse() {
        let id = PlayerId::new();
        let parsed: PlayerId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!("not-a-uuid".parse::<PlayerId>().is_err());
    }

    #[test]
    fn test_outcome_reversed() {
        assert_eq!(Outcome::Player1Wins.reversed(), Outcome::Player2Wins);
        assert_eq!(Outcome::Player2Wins.reversed(), Outcome::Player1Wins);
        assert_eq!(Outcome::Draw.reversed(), Outcome::Draw);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!GameStatus::Created.is_terminal());
        assert!(!GameStatus::SecondMoveSubmitted.is_terminal());
        assert!(GameStatus::Resolved.is_terminal());
        assert!(GameStatus::Refunded.is_terminal());
    }
}
