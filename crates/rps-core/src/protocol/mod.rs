//! Protocol types and observable events.

mod events;
mod types;

pub use events::GameEvent;
pub use types::{GameStatus, Outcome, PlayerId, Timestamp};
