//! Moves and the outcome resolver.

mod rps;

pub use rps::{resolve, Move};
