//! Credential hashing.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Derives and checks stored credentials.
///
/// The user actor receives an encoder as its context, so tests and deployments can
/// swap the algorithm without touching the entity.
pub trait PasswordEncoder: Send + Sync {
    fn encode(&self, raw: &str) -> String;
    fn is_match(&self, raw: &str, encoded: &str) -> bool;
}

/// Salted SHA-256, stored as `salt$digest` in hex.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Encoder;

impl Sha256Encoder {
    fn digest(salt: &str, raw: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(raw.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl PasswordEncoder for Sha256Encoder {
    fn encode(&self, raw: &str) -> String {
        let salt = Uuid::new_v4().simple().to_string();
        let digest = Self::digest(&salt, raw);
        format!("{salt}${digest}")
    }

    fn is_match(&self, raw: &str, encoded: &str) -> bool {
        match encoded.split_once('$') {
            Some((salt, digest)) => Self::digest(salt, raw) == digest,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_value_hides_the_password() {
        let encoded = Sha256Encoder.encode("secret1");
        assert!(!encoded.contains("secret1"));
        assert!(Sha256Encoder.is_match("secret1", &encoded));
        assert!(!Sha256Encoder.is_match("secret2", &encoded));
    }

    #[test]
    fn salts_differ_between_encodings() {
        assert_ne!(Sha256Encoder.encode("same"), Sha256Encoder.encode("same"));
    }

    #[test]
    fn malformed_hash_never_matches() {
        assert!(!Sha256Encoder.is_match("secret1", "not-a-hash"));
    }
}
