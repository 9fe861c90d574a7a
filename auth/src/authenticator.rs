use std::sync::OnceLock;

use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::SigningSecret;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenVerifier;
use crate::password::PasswordHasher;
use crate::registry::RegistryError;
use crate::registry::User;
use crate::registry::UserRegistry;

const BEARER_SCHEME: &str = "Bearer";

/// Authentication coordinator combining the user registry, password
/// verification and token handling.
///
/// Built once at startup and shared by reference with request handlers.
/// Every operation is synchronous; `login` spends most of its time in
/// password verification.
pub struct AuthenticationService {
    registry: UserRegistry,
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_verifier: TokenVerifier,
    decoy_hash: OnceLock<Option<String>>,
}

/// Authentication operation errors.
///
/// Display strings are the messages returned to API clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("authorization header missing")]
    MissingCredentials,

    #[error("authorization header invalid")]
    MalformedHeader,

    #[error(transparent)]
    Token(#[from] JwtError),
}

impl AuthenticationService {
    /// Create a new authentication service with an empty registry.
    ///
    /// # Arguments
    /// * `secret` - Secret for signing and verifying tokens
    ///
    /// # Returns
    /// Service issuing tokens without expiry
    pub fn new(secret: SigningSecret) -> Self {
        Self {
            registry: UserRegistry::new(),
            password_hasher: PasswordHasher::new(),
            token_issuer: TokenIssuer::new(secret.clone()),
            token_verifier: TokenVerifier::new(secret),
            decoy_hash: OnceLock::new(),
        }
    }

    /// Stamp issued tokens with an expiry `lifetime` after issue.
    pub fn with_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_issuer = self.token_issuer.with_lifetime(lifetime);
        self
    }

    pub fn registry(&self) -> &UserRegistry {
        &self.registry
    }

    /// Register a user. See [`UserRegistry::add`].
    pub fn add_user(
        &self,
        username: &str,
        password: &str,
        role: &str,
    ) -> Result<User, RegistryError> {
        self.registry.add(username, password, role)
    }

    /// Verify credentials and issue a token.
    ///
    /// Unknown users and wrong passwords fail identically. An unknown user
    /// still costs one hash verification.
    ///
    /// # Arguments
    /// * `username` - Username to authenticate
    /// * `password` - Plaintext password to verify
    ///
    /// # Returns
    /// Signed access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user or password mismatch
    /// * `Token` - Token signing failed
    pub fn login(&self, username: &str, password: &str) -> Result<String, AuthenticationError> {
        let Some(user) = self.registry.find(username) else {
            self.burn_verification(password);
            tracing::debug!(username = %username, "Login rejected: unknown user");
            return Err(AuthenticationError::InvalidCredentials);
        };

        if !self.password_hasher.verify(password, user.password_hash()) {
            tracing::debug!(username = %username, "Login rejected: password mismatch");
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_issuer.issue(&user)?)
    }

    /// Authorize a request from its `Authorization` header value.
    ///
    /// # Arguments
    /// * `header` - Raw header value, `None` when the header is absent
    ///
    /// # Returns
    /// Claims of the presented token
    ///
    /// # Errors
    /// * `MissingCredentials` - Header absent or empty
    /// * `MalformedHeader` - Not exactly `Bearer <token>`
    /// * `Token` - Token verification failed
    pub fn authorize(&self, header: Option<&str>) -> Result<Claims, AuthenticationError> {
        let header = match header {
            Some(value) if !value.is_empty() => value,
            _ => return Err(AuthenticationError::MissingCredentials),
        };

        let parts: Vec<&str> = header.split(' ').collect();
        let token = match parts.as_slice() {
            [BEARER_SCHEME, token] => *token,
            _ => return Err(AuthenticationError::MalformedHeader),
        };

        Ok(self.token_verifier.verify(token)?)
    }

    fn burn_verification(&self, password: &str) {
        let decoy = self
            .decoy_hash
            .get_or_init(|| self.password_hasher.hash("decoy-password").ok());

        if let Some(hash) = decoy {
            self.password_hasher.verify(password, hash);
        }
    }
}
