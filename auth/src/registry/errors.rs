use thiserror::Error;

use crate::password::PasswordError;

/// Error type for user registry operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("username {0} already exists")]
    DuplicateUser(String),

    #[error("username must not be empty")]
    InvalidUsername,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),
}
