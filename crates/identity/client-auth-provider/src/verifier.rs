//! Pluggable secret verification strategies.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};

/// Strategy for comparing a presented secret against its stored
/// representation.
///
/// Implementations are pure: `encode` must be deterministic in its inputs,
/// and `matches` must decide by exact string comparison of encodings.
pub trait SecretVerifier: Send + Sync {
    /// Encode a raw secret, mixing in the per-client salt when one is
    /// present.
    fn encode(&self, raw: &str, salt: Option<&str>) -> String;

    /// Whether `raw` (under `salt`) encodes to the stored representation.
    fn matches(&self, stored: &str, raw: &str, salt: Option<&str>) -> bool {
        self.encode(raw, salt) == stored
    }
}

/// Identity encoding: the stored secret is the plaintext secret.
///
/// This is the provider's default when no verifier is configured.
pub struct PlaintextVerifier;

impl SecretVerifier for PlaintextVerifier {
    fn encode(&self, raw: &str, _salt: Option<&str>) -> String {
        raw.to_string()
    }
}

/// SHA-256 digest encoding, base64url without padding.
///
/// The salt, when present, is prepended to the raw secret before hashing.
pub struct Sha256SecretVerifier;

impl SecretVerifier for Sha256SecretVerifier {
    fn encode(&self, raw: &str, salt: Option<&str>) -> String {
        let mut hasher = Sha256::new();
        if let Some(salt) = salt {
            hasher.update(salt.as_bytes());
        }
        hasher.update(raw.as_bytes());
        URL_SAFE_NO_PAD.encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plaintext_matches_exact_string_only() {
        let verifier = PlaintextVerifier;
        assert!(verifier.matches("mySecret", "mySecret", None));
        assert!(!verifier.matches("mySecret", "myInvalidSecret", None));
        // Salt is ignored in plaintext mode
        assert!(verifier.matches("mySecret", "mySecret", Some("mySalt")));
    }

    #[test]
    fn sha256_encoding_is_deterministic() {
        let verifier = Sha256SecretVerifier;
        assert_eq!(
            verifier.encode("mySecret", None),
            "0L5zNClDL38A1CXhqwA0Eq-nXUH-KA2Lsus-gv78VrY"
        );
        assert_eq!(
            verifier.encode("mySecret", None),
            verifier.encode("mySecret", None)
        );
    }

    #[test]
    fn sha256_salt_changes_the_encoding() {
        let verifier = Sha256SecretVerifier;
        assert_eq!(
            verifier.encode("mySecret", Some("mySalt")),
            "zMDTH8qz_nAqk1QN_tibZniyBiOTUbEwCTzX3RcV-W0"
        );
        assert_ne!(
            verifier.encode("mySecret", Some("mySalt")),
            verifier.encode("mySecret", None)
        );
    }

    #[test]
    fn sha256_matches_stored_digest() {
        let verifier = Sha256SecretVerifier;
        let stored = verifier.encode("mySecret", None);
        assert!(verifier.matches(&stored, "mySecret", None));
        assert!(!verifier.matches(&stored, "otherSecret", None));
        // Wrong salt means a different digest
        assert!(!verifier.matches(&stored, "mySecret", Some("mySalt")));
    }
}
