//! Builders wiring Diesel repositories and adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use bloodbank::domain::ports::{PasswordHasher, RequestNotifier, TokenService};
use bloodbank::domain::{AccountService, BloodRequestService, DonorService, HospitalService};
use bloodbank::inbound::http::state::HttpState;
use bloodbank::inbound::http::token_config::TokenSettings;
use bloodbank::outbound::notify::TracingRequestNotifier;
use bloodbank::outbound::persistence::{
    DbPool, DieselBloodRequestRepository, DieselDonorRepository, DieselHospitalRepository,
};
use bloodbank::outbound::security::{Argon2PasswordHasher, JwtTokenService};

/// Repositories shared between services.
struct Repositories {
    donors: Arc<DieselDonorRepository>,
    hospitals: Arc<DieselHospitalRepository>,
    requests: Arc<DieselBloodRequestRepository>,
}

impl Repositories {
    fn new(pool: &DbPool) -> Self {
        Self {
            donors: Arc::new(DieselDonorRepository::new(pool.clone())),
            hospitals: Arc::new(DieselHospitalRepository::new(pool.clone())),
            requests: Arc::new(DieselBloodRequestRepository::new(pool.clone())),
        }
    }
}

/// Build the shared HTTP state from a connection pool and token settings.
pub fn build_http_state(pool: &DbPool, tokens: &TokenSettings) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let repos = Repositories::new(pool);
    let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(
        tokens.secret.as_slice(),
        tokens.ttl,
        clock.clone(),
    ));
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let notifier: Arc<dyn RequestNotifier> = Arc::new(TracingRequestNotifier::new());

    let accounts = AccountService::new(
        repos.donors.clone(),
        repos.hospitals.clone(),
        hasher,
        token_service.clone(),
        clock.clone(),
    );
    let donors = DonorService::new(repos.donors.clone(), repos.requests.clone(), clock.clone());
    let hospitals = Arc::new(HospitalService::new(repos.hospitals.clone(), clock.clone()));
    let requests = Arc::new(BloodRequestService::new(
        repos.hospitals,
        repos.donors,
        repos.requests,
        notifier,
        clock,
    ));

    web::Data::new(HttpState {
        accounts: Arc::new(accounts),
        donors: Arc::new(donors),
        hospitals: hospitals.clone(),
        hospital_commands: hospitals,
        requests: requests.clone(),
        request_queries: requests,
        tokens: token_service,
    })
}
