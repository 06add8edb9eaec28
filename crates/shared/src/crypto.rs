//! Cryptographic utilities for version hashing and secret masking.

use sha2::{Digest, Sha256};

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Masks a sensitive setting value for display.
///
/// Values of four characters or fewer are fully replaced with `****`.
/// Longer values keep their first four characters followed by one asterisk
/// per hidden character, capped at 20 asterisks.
pub fn mask_secret(value: &str) -> String {
    let len = value.chars().count();
    if len <= 4 {
        return "****".to_string();
    }
    let prefix: String = value.chars().take(4).collect();
    let masked = (len - 4).min(20);
    format!("{}{}", prefix, "*".repeat(masked))
}
