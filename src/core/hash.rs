//! State Fingerprints
//!
//! A SHA-256 digest over a game's fields, fed in a fixed order. Two games
//! with the same board, score, flags and difficulty fingerprint the same,
//! which is what replay verification compares.

use sha2::{Sha256, Digest};

/// Digest output (32 bytes).
pub type StateHash = [u8; 32];

const GAME_DOMAIN: &[u8] = b"FUSION_2048_STATE_V1";

/// Incremental fingerprint of a game. Field order is part of the format.
pub struct Fingerprint(Sha256);

impl Default for Fingerprint {
    fn default() -> Self {
        Self::new()
    }
}

impl Fingerprint {
    /// Start a game fingerprint.
    pub fn new() -> Self {
        Self(Sha256::new_with_prefix(GAME_DOMAIN))
    }

    /// Add one byte.
    pub fn byte(&mut self, value: u8) -> &mut Self {
        self.0.update([value]);
        self
    }

    /// Add a little-endian 64-bit word.
    pub fn word(&mut self, value: u64) -> &mut Self {
        self.0.update(value.to_le_bytes());
        self
    }

    /// Add a flag as one byte.
    pub fn flag(&mut self, value: bool) -> &mut Self {
        self.byte(value as u8)
    }

    /// Finish the digest.
    pub fn finish(self) -> StateHash {
        self.0.finalize().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_tagged() {
        let untagged: StateHash = Sha256::digest(b"").into();
        assert_ne!(Fingerprint::new().finish(), untagged);
    }

    #[test]
    fn test_flag_is_a_byte() {
        let mut a = Fingerprint::new();
        a.flag(true).word(4);
        let mut b = Fingerprint::new();
        b.byte(1).word(4);
        assert_eq!(a.finish(), b.finish());
    }
}
