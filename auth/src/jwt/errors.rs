use thiserror::Error;

/// Error type for JWT operations.
///
/// Display strings are safe to return to API clients.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("token signing failed: {0}")]
    Signing(String),

    #[error("token is malformed: {0}")]
    MalformedToken(String),

    #[error("signing method {0} is not valid")]
    UnsupportedAlgorithm(String),

    #[error("signature is invalid")]
    InvalidSignature,

    #[error("token is expired")]
    Expired,
}
