//! HS256 JSON Web Token implementation of the `TokenService` port.
//!
//! Expiry is checked against the injected clock rather than the system time
//! so issuance and verification agree in tests.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{IssuedToken, TokenService, TokenServiceError};
use crate::domain::{AccountKind, Principal};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    kind: AccountKind,
    name: String,
    email: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies bearer tokens with a shared secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Build a service signing with `secret`; tokens live for `ttl`.
    #[must_use]
    pub fn new(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
            clock,
        }
    }

    fn expires_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_add_signed(self.ttl).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, principal: &Principal) -> Result<IssuedToken, TokenServiceError> {
        let now = self.clock.utc();
        let expires_at = self.expires_at(now);
        let claims = Claims {
            sub: principal.id(),
            kind: principal.kind(),
            name: principal.name().to_owned(),
            email: principal.email().to_owned(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenServiceError::signing(err.to_string()))?;
        Ok(IssuedToken { token, expires_at })
    }

    fn verify(&self, token: &str) -> Result<Principal, TokenServiceError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|err| {
            match err.kind() {
                ErrorKind::ExpiredSignature => TokenServiceError::expired(),
                _ => TokenServiceError::invalid(err.to_string()),
            }
        })?;
        let claims = data.claims;
        if claims.exp <= self.clock.utc().timestamp() {
            return Err(TokenServiceError::expired());
        }
        Ok(Principal::new(
            claims.sub,
            claims.kind,
            claims.name,
            claims.email,
        ))
    }
}
