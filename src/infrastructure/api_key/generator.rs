//! Key secret generation and hashing

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Characters of the random part kept in the display prefix
const DISPLAY_CHARS: usize = 6;

/// A freshly generated secret. `secret` is handed to the caller once and
/// never stored.
#[derive(Clone)]
pub struct GeneratedSecret {
    pub secret: String,
    /// Marker plus a few random characters, for display only
    pub prefix: String,
    /// `sha256$<base64url>` digest of the full secret
    pub hash: String,
}

impl std::fmt::Debug for GeneratedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedSecret")
            .field("secret", &"[REDACTED]")
            .field("prefix", &self.prefix)
            .finish()
    }
}

/// Hash a secret for storage and lookup. Deterministic.
pub fn hash_secret(secret: &str) -> String {
    let digest = Sha256::digest(secret.as_bytes());
    format!("sha256${}", URL_SAFE_NO_PAD.encode(digest))
}

/// Generator for key secrets
#[derive(Debug, Clone)]
pub struct KeyGenerator {
    marker: String,
    key_bytes: usize,
}

impl KeyGenerator {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            key_bytes: 32,
        }
    }

    /// Number of random bytes per secret
    pub fn with_key_bytes(mut self, bytes: usize) -> Self {
        self.key_bytes = bytes;
        self
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn generate(&self) -> GeneratedSecret {
        let mut random_bytes = vec![0u8; self.key_bytes];
        rand::thread_rng().fill_bytes(&mut random_bytes);

        let encoded = URL_SAFE_NO_PAD.encode(&random_bytes);
        let secret = format!("{}{}", self.marker, encoded);
        let prefix = format!(
            "{}{}",
            self.marker,
            &encoded[..DISPLAY_CHARS.min(encoded.len())]
        );

        GeneratedSecret {
            hash: hash_secret(&secret),
            secret,
            prefix,
        }
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new("fg_live_")
    }
}
