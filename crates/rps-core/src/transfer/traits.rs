//! Value transfer trait definition.

use crate::protocol::PlayerId;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from moving value in or out of the engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("Transfer failed: {0}")]
    TransferFailed(String),
}

/// Trait for the atomic value-transfer primitive the engine settles through.
///
/// Implementations can be:
/// - MockTransfer for testing and the demo service
/// - A payment network or custody backend in production
#[async_trait]
pub trait ValueTransfer: Send + Sync {
    /// Take `amount` from the player's external funds into the engine
    async fn collect(&self, from: &PlayerId, amount: u64) -> Result<(), TransferError>;

    /// Send `amount` held by the engine out to the player
    async fn pay(&self, to: &PlayerId, amount: u64) -> Result<(), TransferError>;

    /// External funds available to the player
    async fn wallet_balance(&self, player: &PlayerId) -> Result<u64, TransferError>;
}
