//! Account registration and login.
//!
//! Implements [`AccountCommand`] over the donor and hospital repositories,
//! a password hasher and a token issuer.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    AccountCommand, DonorRepository, HospitalRepository, LoginSession, PasswordHasher,
    PasswordHasherError, TokenService, TokenServiceError,
};
use crate::domain::repository_errors::{AccountStoreFailure, map_account_error, map_lookup_error};
use crate::domain::{
    AccountCredentials, AccountKind, Donor, DonorDraft, DonorId, DonorRegistration, Error,
    Hospital, HospitalDraft, HospitalId, HospitalRegistration, HospitalStatus, Inventory,
    LoginCredentials, PasswordHash, Principal,
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Argon2id hash with default parameters that no password matches.
///
/// Verified on the unknown-email path so both rejections cost one hash.
pub(crate) const UNKNOWN_ACCOUNT_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$Ymxvb2RiYW5rLWR1bW15IQ$0LbLbiT7rq5fAygVtaJSqIrYkDu+wbrwJpzCv+LR2Dk";

/// Account service implementing the [`AccountCommand`] driving port.
#[derive(Clone)]
pub struct AccountService<D, H> {
    donors: Arc<D>,
    hospitals: Arc<H>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
    clock: Arc<dyn Clock>,
}

impl<D, H> AccountService<D, H> {
    /// Create a new service from its repositories and credential adapters.
    pub fn new(
        donors: Arc<D>,
        hospitals: Arc<H>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            donors,
            hospitals,
            hasher,
            tokens,
            clock,
        }
    }
}

fn duplicate_email(email: &str) -> Error {
    Error::conflict("Email already registered").with_details(json!({
        "field": "email",
        "value": email,
        "code": "duplicate_email",
    }))
}

fn map_signup_error<E: Into<AccountStoreFailure>>(error: E) -> Error {
    map_account_error(error, duplicate_email)
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

fn map_token_error(error: TokenServiceError) -> Error {
    Error::internal(error.to_string())
}

impl<D, H> AccountService<D, H>
where
    D: DonorRepository,
    H: HospitalRepository,
{
    async fn find_credentials(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<AccountCredentials>, Error> {
        match credentials.kind() {
            AccountKind::Donor => self
                .donors
                .find_credentials_by_email(credentials.email())
                .await
                .map_err(map_lookup_error),
            AccountKind::Hospital => self
                .hospitals
                .find_credentials_by_email(credentials.email())
                .await
                .map_err(map_lookup_error),
        }
    }
}

#[async_trait]
impl<D, H> AccountCommand for AccountService<D, H>
where
    D: DonorRepository,
    H: HospitalRepository,
{
    async fn register_donor(&self, registration: DonorRegistration) -> Result<DonorId, Error> {
        let DonorRegistration {
            name,
            email,
            phone,
            password,
            blood_group,
            location,
        } = registration;
        let hash = self
            .hasher
            .hash(password.as_str())
            .await
            .map_err(map_hasher_error)?;
        let donor = Donor::from(DonorDraft {
            id: DonorId::random(),
            name,
            email,
            phone,
            blood_group,
            location,
            last_donation: None,
            donation_history: Vec::new(),
            created_at: self.clock.utc(),
        });
        self.donors
            .insert(&donor, &hash)
            .await
            .map_err(map_signup_error)?;
        info!(donor_id = %donor.id(), blood_group = %donor.blood_group(), "donor registered");
        Ok(donor.id())
    }

    async fn register_hospital(
        &self,
        registration: HospitalRegistration,
    ) -> Result<HospitalId, Error> {
        let HospitalRegistration {
            hospital_name,
            email,
            phone,
            password,
            registration_number,
            location,
            operating_hours,
            emergency_contact,
        } = registration;
        let hash = self
            .hasher
            .hash(password.as_str())
            .await
            .map_err(map_hasher_error)?;
        let hospital = Hospital::from(HospitalDraft {
            id: HospitalId::random(),
            hospital_name,
            email,
            phone,
            registration_number,
            location,
            inventory: Inventory::default(),
            status: HospitalStatus::Active,
            operating_hours,
            emergency_contact,
            reviews: Vec::new(),
            created_at: self.clock.utc(),
        });
        self.hospitals
            .insert(&hospital, &hash)
            .await
            .map_err(map_signup_error)?;
        info!(hospital_id = %hospital.id(), city = hospital.location().city(), "hospital registered");
        Ok(hospital.id())
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginSession, Error> {
        let kind = credentials.kind();
        let Some(record) = self.find_credentials(credentials).await? else {
            let dummy = PasswordHash::new(UNKNOWN_ACCOUNT_HASH);
            if let Err(err) = self.hasher.verify(credentials.password(), &dummy).await {
                debug!(%kind, error = %err, "dummy verification failed");
            }
            debug!(%kind, "login for unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let matches = self
            .hasher
            .verify(credentials.password(), &record.password_hash)
            .await
            .map_err(map_hasher_error)?;
        if !matches {
            debug!(%kind, account_id = %record.id, "login with wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        let principal = Principal::new(record.id, kind, record.name.clone(), record.email.as_ref());
        let issued = self.tokens.issue(&principal).map_err(map_token_error)?;
        info!(%kind, account_id = %record.id, "login succeeded");
        Ok(LoginSession {
            token: issued.token,
            kind,
            id: record.id,
            name: record.name,
        })
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
