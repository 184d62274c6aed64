//! OAuth `state` parameter and random correlation tokens.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore, rngs::OsRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::companies::records::CompanyUuid;

const NONCE_BYTES: usize = 16;

/// Bytes of entropy in a pending-connection token.
pub const CORRELATION_TOKEN_BYTES: usize = 32;

/// Round-tripped through the provider's consent screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthState {
    /// Site-relative path the user returns to after the callback.
    pub return_path: String,

    /// Company being (re)connected, when the flow started from one.
    pub company: Option<CompanyUuid>,

    pub nonce: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireState {
    return_path: String,
    #[serde(default)]
    company: Option<Uuid>,
    nonce: String,
}

#[derive(Debug, Error)]
pub enum StateError {
    #[error("state is not valid base64")]
    Encoding,

    #[error("state payload is malformed")]
    Payload(#[source] serde_json::Error),

    #[error("return path must be site-relative")]
    UnsafeReturnPath,

    /// Not issued by this server, already used, or expired.
    #[error("state was not issued here or has expired")]
    Unrecognized,

    #[error("failed to serialize state")]
    Serialization(#[source] serde_json::Error),
}

/// Whether `path` stays on this site: starts with one `/` and no scheme tricks.
#[must_use]
pub fn is_site_relative(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}

impl OAuthState {
    /// Creates state with a fresh nonce.
    ///
    /// # Errors
    ///
    /// Returns an error when `return_path` is not site-relative.
    pub fn new(return_path: &str, company: Option<CompanyUuid>) -> Result<Self, StateError> {
        if !is_site_relative(return_path) {
            return Err(StateError::UnsafeReturnPath);
        }

        Ok(Self {
            return_path: return_path.to_string(),
            company,
            nonce: random_hex(NONCE_BYTES),
        })
    }

    /// URL-safe base64 of the JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be serialized.
    pub fn encode(&self) -> Result<String, StateError> {
        let wire = WireState {
            return_path: self.return_path.clone(),
            company: self.company.map(CompanyUuid::into_uuid),
            nonce: self.nonce.clone(),
        };

        let json = serde_json::to_vec(&wire).map_err(StateError::Serialization)?;

        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    /// Parses state returned on the callback. This only checks its shape;
    /// whether it was issued here is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error for bad encoding, malformed JSON or an unsafe return path.
    pub fn decode(encoded: &str) -> Result<Self, StateError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(encoded.trim_end_matches('='))
            .map_err(|_| StateError::Encoding)?;

        let wire: WireState = serde_json::from_slice(&bytes).map_err(StateError::Payload)?;

        if !is_site_relative(&wire.return_path) {
            return Err(StateError::UnsafeReturnPath);
        }

        Ok(Self {
            return_path: wire.return_path,
            company: wire.company.map(CompanyUuid::from_uuid),
            nonce: wire.nonce,
        })
    }
}

/// Hex string of `bytes` random bytes from the OS generator.
#[must_use]
pub fn random_hex(bytes: usize) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let mut buffer = vec![0_u8; bytes];

    OsRng.fill_bytes(&mut buffer);

    let mut encoded = String::with_capacity(bytes * 2);

    for byte in buffer {
        encoded.push(char::from(HEX[usize::from(byte >> 4)]));
        encoded.push(char::from(HEX[usize::from(byte & 0x0f)]));
    }

    encoded
}

/// Token addressing a pending connection.
#[must_use]
pub fn generate_correlation_token() -> String {
    random_hex(CORRELATION_TOKEN_BYTES)
}
