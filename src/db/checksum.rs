//! Payload checksums for snapshot import deduplication.

use sha2::{Digest, Sha256};

/// SHA-256 of a raw payload, hex-encoded.
pub fn calculate_checksum(payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_is_stable() {
        let a = calculate_checksum("{\"stations\":[]}");
        let b = calculate_checksum("{\"stations\":[]}");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_checksum_detects_any_change() {
        let a = calculate_checksum("{\"stations\":[]}");
        let b = calculate_checksum("{\"stations\": []}");
        assert_ne!(a, b);
    }
}
