//! Service configuration from the environment.

use rps_core::config::{DEFAULT_FEE, DEFAULT_RESOLUTION_WINDOW_SECS};
use rps_core::{EngineConfig, PlayerId};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_FAUCET_AMOUNT: u64 = 10_000;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub engine: EngineConfig,
    /// Amount handed out per faucet call on the demo wallet backend
    pub faucet_amount: u64,
}

impl ServerConfig {
    /// Read `PORT`, `RPS_FEE`, `RPS_RESOLUTION_WINDOW_SECS`, `RPS_OWNER`,
    /// `RPS_START_PAUSED` and `RPS_FAUCET_AMOUNT`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |key: &str| lookup(key).and_then(|s| s.parse::<u64>().ok());

        let port = lookup("PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let owner = match lookup("RPS_OWNER").map(|s| s.parse::<PlayerId>()) {
            Some(Ok(owner)) => owner,
            Some(Err(e)) => {
                tracing::warn!("Ignoring invalid RPS_OWNER: {}", e);
                PlayerId::new()
            }
            None => PlayerId::new(),
        };

        let mut engine = EngineConfig::new(owner)
            .with_fee(parsed("RPS_FEE").unwrap_or(DEFAULT_FEE))
            .with_resolution_window(
                parsed("RPS_RESOLUTION_WINDOW_SECS").unwrap_or(DEFAULT_RESOLUTION_WINDOW_SECS),
            );
        let start_paused = lookup("RPS_START_PAUSED")
            .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        if start_paused {
            engine = engine.paused();
        }

        Self {
            port,
            engine,
            faucet_amount: parsed("RPS_FAUCET_AMOUNT").unwrap_or(DEFAULT_FAUCET_AMOUNT),
        }
    }
}
