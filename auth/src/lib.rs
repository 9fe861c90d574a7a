//! Authentication registry and token lifecycle
//!
//! Provides the authentication core used by the HTTP service:
//! - Password hashing (Argon2id)
//! - Sorted in-memory user registry
//! - JWT issuing and verification (HMAC-SHA256)
//! - Login and request authorization
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{AuthenticationService, SigningSecret};
//!
//! let auth = AuthenticationService::new(SigningSecret::new(b"secret_key_at_least_32_bytes_long!"));
//!
//! // Register
//! auth.add_user("admin", "password123", "admin").unwrap();
//!
//! // Login: verify and generate token
//! let token = auth.login("admin", "password123").unwrap();
//!
//! // Authorize a later request
//! let claims = auth.authorize(Some(&format!("Bearer {}", token))).unwrap();
//! assert_eq!(claims.role, "admin");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod registry;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationService;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::SigningSecret;
pub use jwt::TokenIssuer;
pub use jwt::TokenVerifier;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use registry::RegistryError;
pub use registry::User;
pub use registry::UserRegistry;
