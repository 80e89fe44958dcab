//! Session tokens.
//!
//! A session token is an HS256 JWT that embeds the identity the client sent
//! on login, verbatim, plus `iat` and `exp`. Tokens live for one hour and are
//! never tracked server-side: logging out only clears the cookie.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{Fields, strip_reserved};

/// Lifetime of a session token, in seconds.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

fn token_ttl() -> Duration {
    Duration::seconds(TOKEN_TTL_SECS)
}

/// Identity carried by a session token.
///
/// ```json
/// { "email": "jane@example.com", "name": "Jane" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,

    #[serde(flatten)]
    pub fields: Fields,
}

impl Identity {
    /// Drop keys that would clash with the registered claims.
    pub fn sanitized(mut self) -> Self {
        strip_reserved(&mut self.fields, &["exp", "iat", "nbf", "aud"]);
        self
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(flatten)]
    identity: Identity,
    iat: i64,
    exp: i64,
}

/// Signs and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller's clock in `verify_at`
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn issue(&self, identity: &Identity) -> Result<String, AppError> {
        self.issue_at(identity, Utc::now())
    }

    /// Sign a token for `identity` as if issued at `now`.
    pub fn issue_at(&self, identity: &Identity, now: DateTime<Utc>) -> Result<String, AppError> {
        let claims = Claims {
            identity: identity.clone().sanitized(),
            iat: now.timestamp(),
            exp: (now + token_ttl()).timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> Result<Identity, AppError> {
        self.verify_at(token, Utc::now())
    }

    /// Check signature and expiry of `token` at time `now`.
    ///
    /// # Errors
    ///
    /// `Unauthorized` for any malformed, tampered or expired token.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, AppError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "rejected session token");
            AppError::Unauthorized
        })?;

        if data.claims.exp <= now.timestamp() {
            tracing::debug!(exp = data.claims.exp, "session token expired");
            return Err(AppError::Unauthorized);
        }

        Ok(data.claims.identity)
    }
}
