//! Cryptographic primitives for the commit-reveal scheme.
//!
//! This module provides:
//! - Secret, the nonce that hides a committed move
//! - Commitment, the identity-bound hash published before the opponent moves

mod commitment;

pub use commitment::{Commitment, Secret};

/// Hex (de)serialization for fixed 32-byte values
pub(crate) mod hex_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], s: S) -> Result<S::Ok, S::Error> {
        hex::encode(bytes).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 32], D::Error> {
        let hex_str = String::deserialize(d)?;
        super::commitment::decode_hex32(&hex_str).map_err(serde::de::Error::custom)
    }
}
