//! Caller identity resolution.
//!
//! Users sign in with the external identity provider, which issues a signed
//! JWT. The admin API never stores credentials; it only verifies the token
//! and takes the `sub` claim as the caller's [`OwnerId`].

mod error;

pub use error::IdentityError;

use axum::http::{HeaderMap, header::AUTHORIZATION};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use secrecy::ExposeSecret;
use serde::Deserialize;

use shop_pilot_core::OwnerId;

use crate::config::{AuthConfig, AuthKey};

/// Claims we read from identity tokens.
///
/// `exp` (and `iss` when configured) are checked by `jsonwebtoken` itself.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
}

/// Verifies identity-provider tokens.
#[derive(Clone)]
pub struct IdentityVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for IdentityVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityVerifier")
            .field("algorithms", &self.validation.algorithms)
            .field("issuer", &self.validation.iss)
            .finish_non_exhaustive()
    }
}

impl IdentityVerifier {
    /// Build a verifier from configuration.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::InvalidKey` if the RS256 public key is not valid PEM.
    pub fn from_config(config: &AuthConfig) -> Result<Self, IdentityError> {
        let verifier = match &config.key {
            AuthKey::Hs256(secret) => Self::hs256(secret.expose_secret().as_bytes()),
            AuthKey::Rs256 { public_key_pem } => {
                let key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
                    .map_err(|e| IdentityError::InvalidKey(e.to_string()))?;
                Self {
                    key,
                    validation: Validation::new(Algorithm::RS256),
                }
            }
        };

        Ok(match &config.issuer {
            Some(issuer) => verifier.with_issuer(issuer),
            None => verifier,
        })
    }

    /// Verifier for HS256 tokens signed with a shared secret.
    #[must_use]
    pub fn hs256(secret: &[u8]) -> Self {
        Self {
            key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Require the given `iss` claim.
    #[must_use]
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.validation.set_issuer(&[issuer]);
        self
    }

    /// Verify a raw token and return the caller's identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the signature, expiry, or issuer check fails, or
    /// if the subject is blank.
    pub fn verify(&self, token: &str) -> Result<OwnerId, IdentityError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)?;
        Ok(OwnerId::parse(&data.claims.sub)?)
    }

    /// Resolve the caller's identity from request headers.
    ///
    /// # Errors
    ///
    /// Returns an error if the `Authorization` header is missing, is not a
    /// bearer token, or carries a token that fails verification.
    pub fn identify(&self, headers: &HeaderMap) -> Result<OwnerId, IdentityError> {
        let token = bearer_token(headers)?;
        self.verify(token)
    }
}

/// Extract the bearer token from the `Authorization` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, IdentityError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(IdentityError::MissingToken)?
        .to_str()
        .map_err(|_| IdentityError::MalformedHeader)?;

    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or(IdentityError::MalformedHeader)?;

    if token.is_empty() {
        return Err(IdentityError::MalformedHeader);
    }

    Ok(token)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde::Serialize;

    const SECRET: &[u8] = b"k9$Qz!v2Lr#8Xw@p5Tn&3Mb*7Yc^1Hd%";

    #[derive(Serialize)]
    struct TestClaims<'a> {
        sub: &'a str,
        exp: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        iss: Option<&'a str>,
    }

    fn token(sub: &str, exp_offset: i64, iss: Option<&str>) -> String {
        let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap();
        let exp = now.saturating_add_signed(exp_offset);
        encode(
            &Header::new(Algorithm::HS256),
            &TestClaims { sub, exp, iss },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap()
    }

    #[test]
    fn test_verify_valid_token() {
        let verifier = IdentityVerifier::hs256(SECRET);
        let owner = verifier.verify(&token("user_42", 3600, None)).unwrap();
        assert_eq!(owner.as_str(), "user_42");
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let verifier = IdentityVerifier::hs256(SECRET);
        let result = verifier.verify(&token("user_42", -3600, None));
        assert!(matches!(result, Err(IdentityError::InvalidToken(_))));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let verifier = IdentityVerifier::hs256(b"another-signing-key-that-is-long-enough");
        let result = verifier.verify(&token("user_42", 3600, None));
        assert!(matches!(result, Err(IdentityError::InvalidToken(_))));
    }

    #[test]
    fn test_verify_rejects_blank_subject() {
        let verifier = IdentityVerifier::hs256(SECRET);
        let result = verifier.verify(&token("  ", 3600, None));
        assert!(matches!(result, Err(IdentityError::InvalidSubject(_))));
    }

    #[test]
    fn test_verify_enforces_issuer() {
        let verifier = IdentityVerifier::hs256(SECRET).with_issuer("https://clerk.shop-pilot.dev");
        assert!(
            verifier
                .verify(&token("user_42", 3600, Some("https://clerk.shop-pilot.dev")))
                .is_ok()
        );
        assert!(
            verifier
                .verify(&token("user_42", 3600, Some("https://evil.example")))
                .is_err()
        );
    }

    #[test]
    fn test_identify_requires_bearer_header() {
        let verifier = IdentityVerifier::hs256(SECRET);

        let headers = HeaderMap::new();
        assert!(matches!(
            verifier.identify(&headers),
            Err(IdentityError::MissingToken)
        ));

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert!(matches!(
            verifier.identify(&headers),
            Err(IdentityError::MalformedHeader)
        ));

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer   "));
        assert!(matches!(
            verifier.identify(&headers),
            Err(IdentityError::MalformedHeader)
        ));
    }

    #[test]
    fn test_identify_valid_header() {
        let verifier = IdentityVerifier::hs256(SECRET);
        let mut headers = HeaderMap::new();
        let value = format!("Bearer {}", token("user_7", 3600, None));
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&value).unwrap());
        assert_eq!(verifier.identify(&headers).unwrap().as_str(), "user_7");
    }
}
