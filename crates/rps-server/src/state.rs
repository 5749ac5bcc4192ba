//! Application state management.

use chrono::{DateTime, Utc};
use rps_core::{GameRegistry, MockTransfer, Timestamp, ValueTransfer};
use std::sync::{Arc, Mutex};

use crate::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Mutex<AppStateInner>>,
    /// Backend that moves deposits in and withdrawals out
    transfer: Arc<dyn ValueTransfer>,
    /// Demo wallets, when running against the in-memory backend
    faucet: Option<MockTransfer>,
    faucet_amount: u64,
}

struct AppStateInner {
    registry: GameRegistry,
    /// Simulated current time (for timeout testing)
    current_time: Option<DateTime<Utc>>,
}

impl AppState {
    /// Create state backed by an arbitrary transfer implementation
    pub fn new(config: &ServerConfig, transfer: Arc<dyn ValueTransfer>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(AppStateInner {
                registry: GameRegistry::new(config.engine.clone()),
                current_time: None,
            })),
            transfer,
            faucet: None,
            faucet_amount: config.faucet_amount,
        }
    }

    /// Create state backed by in-memory wallets with a faucet
    pub fn with_mock_wallets(config: &ServerConfig, wallets: MockTransfer) -> Self {
        let mut state = Self::new(config, Arc::new(wallets.clone()));
        state.faucet = Some(wallets);
        state
    }

    pub fn transfer(&self) -> &dyn ValueTransfer {
        self.transfer.as_ref()
    }

    pub fn faucet(&self) -> Option<(&MockTransfer, u64)> {
        self.faucet.as_ref().map(|f| (f, self.faucet_amount))
    }

    /// Run one atomic step against the registry.
    ///
    /// The lock is never held across an await, so no external transfer can
    /// run in the middle of a registry update.
    pub fn with_registry<R>(&self, f: impl FnOnce(&mut GameRegistry) -> R) -> R {
        let mut inner = self.inner.lock().unwrap();
        f(&mut inner.registry)
    }

    /// Get current time (real or simulated)
    pub fn now(&self) -> DateTime<Utc> {
        self.inner
            .lock()
            .unwrap()
            .current_time
            .unwrap_or_else(Utc::now)
    }

    /// Current time on the engine clock
    pub fn now_secs(&self) -> Timestamp {
        u64::try_from(self.now().timestamp()).unwrap_or(0)
    }

    /// Advance simulated time by seconds.
    ///
    /// The clock only moves forward. Returns `None`, leaving the clock
    /// untouched, when the step is out of range.
    pub fn advance_time(&self, seconds: u64) -> Option<DateTime<Utc>> {
        let step = i64::try_from(seconds)
            .ok()
            .and_then(chrono::Duration::try_seconds)?;
        let mut inner = self.inner.lock().unwrap();
        let current = inner.current_time.unwrap_or_else(Utc::now);
        let next = current.checked_add_signed(step)?;
        inner.current_time = Some(next);
        Some(next)
    }
}
