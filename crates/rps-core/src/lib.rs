//! RPS Core Library
//!
//! This crate provides the commit-reveal scheme, the outcome resolver, the
//! pull-payment ledger and the game state machine for stake-backed
//! two-player Rock-Paper-Scissors.

pub mod config;
pub mod crypto;
pub mod error;
pub mod games;
pub mod ledger;
pub mod policy;
pub mod protocol;
pub mod registry;
pub mod transfer;

pub use config::EngineConfig;
pub use crypto::{Commitment, Secret};
pub use error::GameError;
pub use games::{resolve, Move};
pub use ledger::Ledger;
pub use policy::{FeePolicy, TimeoutPolicy};
pub use protocol::{GameEvent, GameStatus, Outcome, PlayerId, Timestamp};
pub use registry::{AdminState, GameRecord, GameRegistry};
pub use transfer::{MockTransfer, TransferError, ValueTransfer};
