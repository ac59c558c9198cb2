//! Driving port for account registration and login.
//!
//! Inbound adapters call this port with already validated payloads; the
//! implementation owns hashing, duplicate detection and token issuing.

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{
    AccountKind, DonorId, DonorRegistration, Error, HospitalId, HospitalRegistration,
    LoginCredentials,
};

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginSession {
    /// Signed bearer token.
    pub token: String,
    /// Kind of the authenticated account.
    #[serde(rename = "userType")]
    pub kind: AccountKind,
    /// Account identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

/// Driving port for signup and login.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create a donor account.
    ///
    /// # Errors
    ///
    /// Returns `conflict` when the email is already registered.
    async fn register_donor(&self, registration: DonorRegistration) -> Result<DonorId, Error>;

    /// Create a hospital account.
    ///
    /// # Errors
    ///
    /// Returns `conflict` when the email is already registered.
    async fn register_hospital(
        &self,
        registration: HospitalRegistration,
    ) -> Result<HospitalId, Error>;

    /// Authenticate and issue a bearer token.
    ///
    /// # Errors
    ///
    /// Unknown email and wrong password both yield `unauthorized`.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginSession, Error>;
}
