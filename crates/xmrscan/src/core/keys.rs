use thiserror::Error;
use zeroize::Zeroize;

use crate::core::scalar::SecretScalar;

/// Errors surfaced when parsing caller-provided key material.
///
/// These are the only errors that abort a scan call. Chain content never
/// does: malformed per-output data is skipped, not raised.
#[derive(Debug, Error)]
pub enum KeyParseError {
    #[error("key hex is malformed: {0}")]
    BadHex(#[from] hex::FromHexError),

    #[error("key must encode 32 bytes, got {0}")]
    BadLength(usize),
}

/// The caller's private view key. Immutable for the duration of a scan.
#[derive(Clone)]
pub struct PrivateViewKey(SecretScalar);

impl PrivateViewKey {
    /// Parse from 64 hex characters; the scalar is reduced modulo ℓ.
    pub fn from_hex(s: &str) -> Result<Self, KeyParseError> {
        let mut bytes = hex::decode(s.trim())?;
        if bytes.len() != 32 {
            bytes.zeroize();
            return Err(KeyParseError::BadLength(bytes.len()));
        }

        let mut buf = [0u8; 32];
        buf.copy_from_slice(&bytes);
        bytes.zeroize();

        let key = PrivateViewKey(SecretScalar::from_bytes(buf));
        buf.zeroize();
        Ok(key)
    }

    /// Construct from 32 little-endian bytes, reducing modulo ℓ.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        PrivateViewKey(SecretScalar::from_bytes(bytes))
    }

    /// The underlying scalar.
    pub fn scalar(&self) -> &SecretScalar {
        &self.0
    }
}

// Debug redacted: view keys are never logged.
impl std::fmt::Debug for PrivateViewKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateViewKey(<redacted>)")
    }
}
