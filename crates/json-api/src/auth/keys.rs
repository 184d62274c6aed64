//! API key verification.
//!
//! Only SHA-256 digests of the keys are configured; the keys themselves never
//! reach the server's configuration.

use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors raised while loading configured key digests.
#[derive(Debug, Error)]
pub(crate) enum ApiKeyError {
    /// A digest was not valid hex.
    #[error("api key digest is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// A digest decoded to something other than 32 bytes.
    #[error("api key digest must be 32 bytes, got {0}")]
    Length(usize),

    /// No digests were configured.
    #[error("at least one api key digest is required")]
    Empty,
}

/// Set of accepted API key digests.
#[derive(Clone)]
pub(crate) struct ApiKeys {
    digests: Vec<[u8; 32]>,
}

impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeys")
            .field("digests", &self.digests.len())
            .finish()
    }
}

impl ApiKeys {
    /// Parses hex-encoded SHA-256 digests, ignoring blank entries.
    pub(crate) fn from_hex_digests<S: AsRef<str>>(digests: &[S]) -> Result<Self, ApiKeyError> {
        let digests = digests
            .iter()
            .map(|digest| digest.as_ref().trim())
            .filter(|digest| !digest.is_empty())
            .map(|digest| {
                let bytes = hex::decode(digest)?;
                let len = bytes.len();

                <[u8; 32]>::try_from(bytes).map_err(|_rejected| ApiKeyError::Length(len))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if digests.is_empty() {
            return Err(ApiKeyError::Empty);
        }

        Ok(Self { digests })
    }

    /// Hex digest of `key`, as it is expected in configuration.
    pub(crate) fn digest_hex(key: &str) -> String {
        hex::encode(Sha256::digest(key.as_bytes()))
    }

    /// Whether `key` hashes to one of the configured digests.
    pub(crate) fn verify(&self, key: &str) -> bool {
        let presented: [u8; 32] = Sha256::digest(key.as_bytes()).into();

        self.digests
            .iter()
            .fold(false, |found, digest| found | digests_match(digest, &presented))
    }
}

// Compares every byte so the time taken does not depend on where they differ.
fn digests_match(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter()
        .zip(b.iter())
        .fold(0_u8, |diff, (x, y)| diff | (x ^ y))
        == 0
}
