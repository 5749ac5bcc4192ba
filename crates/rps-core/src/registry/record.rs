//! Per-commitment game record.

use crate::crypto::Commitment;
use crate::error::GameError;
use crate::games::Move;
use crate::protocol::{GameStatus, Outcome, PlayerId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub commitment: Commitment,
    pub player1: PlayerId,
    pub player2: Option<PlayerId>,
    /// Net amount each side risks, after the fee
    pub stake: u64,
    pub second_move: Option<Move>,
    pub join_deadline: Timestamp,
    pub resolve_deadline: Option<Timestamp>,
    pub created_at: Timestamp,
    pub status: GameStatus,
    pub outcome: Option<Outcome>,
    /// When the game reached a terminal state
    pub settled_at: Option<Timestamp>,
}

impl GameRecord {
    pub(crate) fn new(
        commitment: Commitment,
        player1: PlayerId,
        stake: u64,
        join_deadline: Timestamp,
        created_at: Timestamp,
    ) -> Self {
        Self {
            commitment,
            player1,
            player2: None,
            stake,
            second_move: None,
            join_deadline,
            resolve_deadline: None,
            created_at,
            status: GameStatus::Created,
            outcome: None,
            settled_at: None,
        }
    }

    pub(crate) fn expect_status(&self, expected: GameStatus) -> Result<(), GameError> {
        if self.status != expected {
            return Err(GameError::invalid_state(expected, self.status));
        }
        Ok(())
    }

    /// Value currently held in escrow for this game
    pub fn escrowed(&self) -> u128 {
        match self.status {
            GameStatus::Created => u128::from(self.stake),
            GameStatus::SecondMoveSubmitted => u128::from(self.stake) * 2,
            GameStatus::Resolved | GameStatus::Refunded => 0,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
