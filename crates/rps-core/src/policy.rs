//! Fee and timeout policies consulted by the state machine.

use crate::error::GameError;
use crate::protocol::Timestamp;
use serde::{Deserialize, Serialize};

/// Flat fee charged on every funded deposit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeePolicy {
    pub fee: u64,
}

impl FeePolicy {
    pub fn new(fee: u64) -> Self {
        Self { fee }
    }

    /// Split a deposit into its net stake, which must be positive
    pub fn net_stake(&self, deposited: u64) -> Result<u64, GameError> {
        if deposited <= self.fee {
            return Err(GameError::InsufficientDeposit {
                deposited,
                fee: self.fee,
            });
        }
        Ok(deposited - self.fee)
    }
}

/// Expiry windows for joining and resolving a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutPolicy {
    /// How long player 2 waits for player 1 to reveal, in seconds
    pub resolution_window: u64,
}

impl TimeoutPolicy {
    pub fn new(resolution_window: u64) -> Self {
        Self { resolution_window }
    }

    /// Deadline for a counterparty to join, counted from game creation
    pub fn join_deadline(&self, now: Timestamp, join_expiry: u64) -> Result<Timestamp, GameError> {
        now.checked_add(join_expiry).ok_or(GameError::InvalidExpiry)
    }

    /// Deadline for player 1 to reveal, counted from the second move
    pub fn resolve_deadline(&self, now: Timestamp) -> Timestamp {
        now.saturating_add(self.resolution_window)
    }

    /// A deadline is passed only when `now` is strictly later
    pub fn is_expired(deadline: Timestamp, now: Timestamp) -> bool {
        now > deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_stake() {
        let fees = FeePolicy::new(100);
        assert_eq!(fees.net_stake(500).unwrap(), 400);
        assert_eq!(fees.net_stake(101).unwrap(), 1);
    }

    #[test]
    fn test_deposit_must_exceed_fee() {
        let fees = FeePolicy::new(100);
        assert_eq!(
            fees.net_stake(100),
            Err(GameError::InsufficientDeposit {
                deposited: 100,
                fee: 100
            })
        );
        assert!(fees.net_stake(0).is_err());
    }

    #[test]
    fn test_zero_fee_still_needs_positive_stake() {
        let fees = FeePolicy::new(0);
        assert!(fees.net_stake(0).is_err());
        assert_eq!(fees.net_stake(1).unwrap(), 1);
    }

    #[test]
    fn test_deadline_boundary_is_inclusive() {
        assert!(!TimeoutPolicy::is_expired(600, 599));
        assert!(!TimeoutPolicy::is_expired(600, 600));
        assert!(TimeoutPolicy::is_expired(600, 601));
    }

    #[test]
    fn test_deadlines_start_from_event() {
        let timeouts = TimeoutPolicy::new(3600);
        assert_eq!(timeouts.join_deadline(1_000, 600).unwrap(), 1_600);
        assert_eq!(timeouts.resolve_deadline(2_000), 5_600);
    }

    #[test]
    fn test_join_expiry_overflow() {
        let timeouts = TimeoutPolicy::new(3600);
        assert_eq!(
            timeouts.join_deadline(u64::MAX - 1, 10),
            Err(GameError::InvalidExpiry)
        );
    }
}
