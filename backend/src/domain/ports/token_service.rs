//! Port for issuing and verifying bearer tokens.
use chrono::{DateTime, Utc};

use crate::domain::Principal;

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenServiceError {
        /// The token is malformed, forged or carries unusable claims.
        Invalid { message: String } => "invalid token: {message}",
        /// The token was valid but has expired.
        Expired => "token expired",
        /// A token could not be produced.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// A signed bearer token and its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Signed token.
    pub token: String,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
}

/// Issue and verify bearer tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Sign a token identifying `principal`.
    fn issue(&self, principal: &Principal) -> Result<IssuedToken, TokenServiceError>;

    /// Decode and validate `token`.
    fn verify(&self, token: &str) -> Result<Principal, TokenServiceError>;
}
