//! Pull-payment balance ledger.
//!
//! Every payout and fee is credited here first; value leaves the system only
//! through [`Ledger::withdraw`], which zeroes the balance in the same step that
//! computes the payout amount.

use crate::error::GameError;
use crate::protocol::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Ledger {
    balances: HashMap<PlayerId, u64>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the player's balance.
    ///
    /// # Panics
    ///
    /// Panics on overflow: balances are bounded by total deposits, so an
    /// overflow means the books no longer balance.
    pub fn credit(&mut self, player: PlayerId, amount: u64) {
        if amount == 0 {
            return;
        }
        let balance = self.balances.entry(player).or_insert(0);
        *balance = match balance.checked_add(amount) {
            Some(next) => next,
            None => panic!("ledger overflow crediting {} to {}", amount, player),
        };
    }

    /// Drain the player's balance, returning the amount to pay out.
    pub fn withdraw(&mut self, player: &PlayerId) -> Result<u64, GameError> {
        match self.balances.remove(player) {
            Some(amount) if amount > 0 => Ok(amount),
            _ => Err(GameError::NoBalance),
        }
    }

    pub fn balance(&self, player: &PlayerId) -> u64 {
        self.balances.get(player).copied().unwrap_or(0)
    }

    /// Sum of all balances
    pub fn total(&self) -> u128 {
        self.balances.values().map(|&b| u128::from(b)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &u64)> {
        self.balances.iter()
    }
}
