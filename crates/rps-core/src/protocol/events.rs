//! Observable events, one per successful state change.

use crate::crypto::Commitment;
use crate::games::Move;
use crate::protocol::{Outcome, PlayerId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    FeePaid {
        commitment: Commitment,
        sender: PlayerId,
        amount: u64,
    },
    GameStarted {
        commitment: Commitment,
        player1: PlayerId,
        stake: u64,
        expiry: Timestamp,
    },
    SecondMoveSubmitted {
        commitment: Commitment,
        player2: PlayerId,
        second_move: Move,
    },
    GameResolved {
        commitment: Commitment,
        outcome: Outcome,
        /// None on a draw
        winner: Option<PlayerId>,
        stake: u64,
    },
    GameRefunded {
        commitment: Commitment,
        refund_to: PlayerId,
        amount: u64,
    },
    BalanceWithdrawn {
        player: PlayerId,
        amount: u64,
    },
    /// The payout behind an earlier `BalanceWithdrawn` failed and the
    /// balance was restored
    WithdrawalReverted {
        player: PlayerId,
        amount: u64,
    },
    /// A rejected deposit that could not be sent back, held as balance
    DepositCredited {
        player: PlayerId,
        amount: u64,
    },
    OwnerChanged {
        previous: PlayerId,
        new_owner: PlayerId,
    },
    Paused {
        by: PlayerId,
    },
    Resumed {
        by: PlayerId,
    },
    Killed {
        by: PlayerId,
    },
}

impl GameEvent {
    /// Name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::FeePaid { .. } => "fee_paid",
            GameEvent::GameStarted { .. } => "game_started",
            GameEvent::SecondMoveSubmitted { .. } => "second_move_submitted",
            GameEvent::GameResolved { .. } => "game_resolved",
            GameEvent::GameRefunded { .. } => "game_refunded",
            GameEvent::BalanceWithdrawn { .. } => "balance_withdrawn",
            GameEvent::WithdrawalReverted { .. } => "withdrawal_reverted",
            GameEvent::DepositCredited { .. } => "deposit_credited",
            GameEvent::OwnerChanged { .. } => "owner_changed",
            GameEvent::Paused { .. } => "paused",
            GameEvent::Resumed { .. } => "resumed",
            GameEvent::Killed { .. } => "killed",
        }
    }
}
