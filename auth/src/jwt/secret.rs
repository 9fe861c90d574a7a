use std::fmt;

use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;

use super::errors::JwtError;

/// Symmetric key shared by token signing and verification.
///
/// Set once at startup and never rotated. An empty secret is accepted here
/// but every signing or verification attempt with it fails.
#[derive(Clone)]
pub struct SigningSecret {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    is_set: bool,
}

impl SigningSecret {
    /// Create a signing secret from raw bytes.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            is_set: !secret.is_empty(),
        }
    }

    pub fn is_set(&self) -> bool {
        self.is_set
    }

    pub(crate) fn encoding_key(&self) -> Result<&EncodingKey, JwtError> {
        if self.is_set {
            Ok(&self.encoding_key)
        } else {
            Err(JwtError::Signing("signing secret is not set".to_string()))
        }
    }

    pub(crate) fn decoding_key(&self) -> Result<&DecodingKey, JwtError> {
        if self.is_set {
            Ok(&self.decoding_key)
        } else {
            Err(JwtError::Signing("signing secret is not set".to_string()))
        }
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningSecret")
            .field("is_set", &self.is_set)
            .finish_non_exhaustive()
    }
}
