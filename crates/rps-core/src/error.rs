//! Error types for the game engine.

use crate::crypto::Commitment;
use crate::protocol::{GameStatus, Timestamp};
use thiserror::Error;

/// Errors from game, ledger and admin operations.
///
/// Every variant aborts the whole operation; no state is changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Game already exists: {0}")]
    AlreadyExists(Commitment),

    #[error("Game not found: {0}")]
    NotFound(Commitment),

    #[error("Invalid game state: expected {expected}, found {actual}")]
    InvalidState {
        expected: GameStatus,
        actual: GameStatus,
    },

    #[error("Move and secret do not match any game committed by the caller")]
    Unverified,

    #[error("Game isn't expired yet (deadline {deadline})")]
    NotExpired { deadline: Timestamp },

    #[error("Game expired at {deadline}")]
    Expired { deadline: Timestamp },

    #[error("Stake mismatch: expected {expected}, got {actual}")]
    MismatchedStake { expected: u64, actual: u64 },

    #[error("Deposit {deposited} does not cover the fee of {fee}")]
    InsufficientDeposit { deposited: u64, fee: u64 },

    #[error("Stake {0} is too large to be doubled")]
    StakeTooLarge(u64),

    #[error("Invalid move ordinal: {0}")]
    InvalidMove(u8),

    #[error("Unknown move: {0:?}")]
    UnknownMove(String),

    #[error("Join expiry overflows the clock")]
    InvalidExpiry,

    #[error("No balance to withdraw")]
    NoBalance,

    #[error("Sender not authorized")]
    NotAuthorized,

    #[error("Contract is paused")]
    Paused,

    #[error("Contract is killed")]
    Killed,

    #[error("Is not paused")]
    NotPaused,
}

impl GameError {
    pub(crate) fn invalid_state(expected: GameStatus, actual: GameStatus) -> Self {
        GameError::InvalidState { expected, actual }
    }
}
