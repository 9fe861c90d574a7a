pub mod claims;
pub mod errors;
pub mod issuer;
pub mod secret;
pub mod verifier;

pub use claims::Claims;
pub use errors::JwtError;
pub use issuer::TokenIssuer;
pub use secret::SigningSecret;
pub use verifier::TokenVerifier;
