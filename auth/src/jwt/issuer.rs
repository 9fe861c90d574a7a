use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::JwtError;
use super::secret::SigningSecret;
use crate::registry::User;

/// Mints HS256-signed access tokens for registered users.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    secret: SigningSecret,
    lifetime: Option<Duration>,
}

impl TokenIssuer {
    /// Create an issuer whose tokens carry no expiry.
    pub fn new(secret: SigningSecret) -> Self {
        Self {
            secret,
            lifetime: None,
        }
    }

    /// Stamp every issued token with `exp = iat + lifetime`.
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = Some(lifetime);
        self
    }

    /// Issue a token carrying the user's identity claims.
    ///
    /// # Arguments
    /// * `user` - Registered user to issue the token for
    ///
    /// # Returns
    /// Compact JWT: base64url header, payload and signature joined by dots
    ///
    /// # Errors
    /// * `Signing` - Secret is unset or encoding failed
    pub fn issue(&self, user: &User) -> Result<String, JwtError> {
        let now = Utc::now();
        let mut claims = Claims::new(user.username(), user.role()).with_issued_at(now.timestamp());

        if let Some(lifetime) = self.lifetime {
            claims = claims.with_expiration((now + lifetime).timestamp());
        }

        self.sign(&claims)
    }

    /// Sign arbitrary claims with the issuer's secret.
    ///
    /// # Errors
    /// * `Signing` - Secret is unset or encoding failed
    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        let key = self.secret.encoding_key()?;
        let header = Header::new(Algorithm::HS256);

        encode(&header, claims, key).map_err(|e| JwtError::Signing(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    use super::*;

    fn decode_segment(segment: &str) -> serde_json::Value {
        let bytes = URL_SAFE_NO_PAD
            .decode(segment)
            .expect("Failed to decode segment");
        serde_json::from_slice(&bytes).expect("Failed to parse segment")
    }

    #[test]
    fn test_issue_produces_three_segments() {
        let issuer = TokenIssuer::new(SigningSecret::new(b"test_secret_key_at_least_32_bytes!"));
        let user = User::new("admin", "hash", "admin");

        let token = issuer.issue(&user).expect("Failed to issue token");
        let segments: Vec<&str> = token.split('.').collect();

        assert_eq!(segments.len(), 3);
        assert!(segments.iter().all(|segment| !segment.is_empty()));

        let header = decode_segment(segments[0]);
        assert_eq!(header["alg"], "HS256");

        let payload = decode_segment(segments[1]);
        assert_eq!(payload["username"], "admin");
        assert_eq!(payload["role"], "admin");
        assert!(payload["iat"].is_i64());
        assert!(payload.get("exp").is_none());
    }

    #[test]
    fn test_issue_with_lifetime_sets_expiration() {
        let issuer = TokenIssuer::new(SigningSecret::new(b"test_secret_key_at_least_32_bytes!"))
            .with_lifetime(Duration::hours(24));
        let user = User::new("alice", "hash", "reader");

        let token = issuer.issue(&user).expect("Failed to issue token");
        let payload = decode_segment(token.split('.').nth(1).expect("Missing payload"));

        let iat = payload["iat"].as_i64().expect("Missing iat");
        let exp = payload["exp"].as_i64().expect("Missing exp");
        assert_eq!(exp - iat, 24 * 60 * 60);
    }

    #[test]
    fn test_issue_without_secret_fails() {
        let issuer = TokenIssuer::new(SigningSecret::new(b""));
        let user = User::new("admin", "hash", "admin");

        let result = issuer.issue(&user);
        assert!(matches!(result, Err(JwtError::Signing(_))));
    }
}
