use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::Validation;
use serde::Deserialize;

use super::claims::Claims;
use super::errors::JwtError;
use super::secret::SigningSecret;

/// Algorithms a presented token may declare. HMAC family only.
const SUPPORTED_ALGORITHMS: [Algorithm; 3] =
    [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

#[derive(Deserialize)]
struct SegmentHeader {
    alg: String,
}

/// Validates presented tokens and recovers their claims.
///
/// Stateless and safe to share across request handlers.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    secret: SigningSecret,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: SigningSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = SUPPORTED_ALGORITHMS.to_vec();
        // Tokens without 'exp' are valid; expiry is only enforced when present
        validation.required_spec_claims.clear();
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_aud = false;

        Self { secret, validation }
    }

    /// Verify a compact token and return its claims.
    ///
    /// The declared algorithm is checked before the signature, and the
    /// signature before any claim is decoded.
    ///
    /// # Arguments
    /// * `token` - Compact JWT string
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `MalformedToken` - Not three segments, or header/payload not decodable
    /// * `UnsupportedAlgorithm` - Header declares a non-HMAC algorithm
    /// * `Signing` - Secret is unset
    /// * `InvalidSignature` - Signature does not match header and payload
    /// * `Expired` - `exp` claim is in the past
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let segments: Vec<&str> = token.split('.').collect();
        let [header, _payload, signature] = segments.as_slice() else {
            return Err(JwtError::MalformedToken(format!(
                "expected 3 segments, found {}",
                segments.len()
            )));
        };

        let algorithm = Self::declared_algorithm(header)?;
        match algorithm.parse::<Algorithm>() {
            Ok(declared) if SUPPORTED_ALGORITHMS.contains(&declared) => {}
            _ => return Err(JwtError::UnsupportedAlgorithm(algorithm)),
        }

        let key = self.secret.decoding_key()?;

        if URL_SAFE_NO_PAD.decode(signature).is_err() {
            return Err(JwtError::InvalidSignature);
        }

        let token_data =
            decode::<Claims>(token, key, &self.validation).map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::ExpiredSignature => JwtError::Expired,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    JwtError::UnsupportedAlgorithm(algorithm.clone())
                }
                _ => JwtError::MalformedToken("claims could not be decoded".to_string()),
            })?;

        // `exp` values outside the u64 range are skipped by `decode`
        if token_data.claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(token_data.claims)
    }

    fn declared_algorithm(header: &str) -> Result<String, JwtError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(header)
            .map_err(|_| JwtError::MalformedToken("header is not base64url".to_string()))?;

        serde_json::from_slice::<SegmentHeader>(&bytes)
            .map(|header| header.alg)
            .map_err(|_| JwtError::MalformedToken("header could not be decoded".to_string()))
    }
}
