//! Engine configuration, fixed at construction.

use crate::policy::{FeePolicy, TimeoutPolicy};
use crate::protocol::PlayerId;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FEE: u64 = 100;
pub const DEFAULT_RESOLUTION_WINDOW_SECS: u64 = 3600;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Flat fee taken from every funded deposit
    pub fee: u64,
    /// Seconds player 2 waits for player 1 to reveal
    pub resolution_window: u64,
    /// Initial owner, who also receives every fee
    pub owner: PlayerId,
    /// Whether new games are accepted from the start
    #[serde(default = "default_running")]
    pub start_running: bool,
}

fn default_running() -> bool {
    true
}

impl EngineConfig {
    pub fn new(owner: PlayerId) -> Self {
        Self {
            fee: DEFAULT_FEE,
            resolution_window: DEFAULT_RESOLUTION_WINDOW_SECS,
            owner,
            start_running: true,
        }
    }

    pub fn with_fee(mut self, fee: u64) -> Self {
        self.fee = fee;
        self
    }

    pub fn with_resolution_window(mut self, secs: u64) -> Self {
        self.resolution_window = secs;
        self
    }

    pub fn paused(mut self) -> Self {
        self.start_running = false;
        self
    }

    pub fn fee_policy(&self) -> FeePolicy {
        FeePolicy::new(self.fee)
    }

    pub fn timeout_policy(&self) -> TimeoutPolicy {
        TimeoutPolicy::new(self.resolution_window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let owner = PlayerId::new();
        let config = EngineConfig::new(owner);
        assert_eq!(config.fee, DEFAULT_FEE);
        assert_eq!(config.resolution_window, DEFAULT_RESOLUTION_WINDOW_SECS);
        assert_eq!(config.owner, owner);
        assert!(config.start_running);
    }

    #[test]
    fn test_deserialize_without_running_flag() {
        let owner = PlayerId::new();
        let json = format!(
            r#"{{"fee": 5, "resolution_window": 60, "owner": "{}"}}"#,
            owner
        );
        let config: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.fee, 5);
        assert_eq!(config.resolution_window, 60);
        assert!(config.start_running);
    }
}
