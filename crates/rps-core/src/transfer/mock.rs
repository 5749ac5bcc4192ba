//! In-memory value transfer for testing.

use super::traits::{TransferError, ValueTransfer};
use crate::protocol::PlayerId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory wallets keyed by player
#[derive(Clone, Default)]
pub struct MockTransfer {
    wallets: Arc<Mutex<HashMap<PlayerId, u64>>>,
    /// Simulate an unreachable payout backend
    fail_payouts: Arc<AtomicBool>,
}

impl MockTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give a player external funds
    pub fn fund(&self, player: PlayerId, amount: u64) {
        let mut wallets = self.wallets.lock().unwrap();
        let wallet = wallets.entry(player).or_insert(0);
        *wallet = wallet.saturating_add(amount);
    }

    /// Current wallet balance
    pub fn balance(&self, player: &PlayerId) -> u64 {
        self.wallets
            .lock()
            .unwrap()
            .get(player)
            .copied()
            .unwrap_or(0)
    }

    pub fn set_fail_payouts(&self, fail: bool) {
        self.fail_payouts.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ValueTransfer for MockTransfer {
    async fn collect(&self, from: &PlayerId, amount: u64) -> Result<(), TransferError> {
        let mut wallets = self.wallets.lock().unwrap();
        let wallet = wallets.entry(*from).or_insert(0);
        if *wallet < amount {
            return Err(TransferError::InsufficientFunds {
                needed: amount,
                available: *wallet,
            });
        }
        *wallet -= amount;
        Ok(())
    }

    async fn pay(&self, to: &PlayerId, amount: u64) -> Result<(), TransferError> {
        if self.fail_payouts.load(Ordering::SeqCst) {
            return Err(TransferError::TransferFailed(
                "payout backend unavailable".to_string(),
            ));
        }
        self.fund(*to, amount);
        Ok(())
    }

    async fn wallet_balance(&self, player: &PlayerId) -> Result<u64, TransferError> {
        Ok(self.balance(player))
    }
}
