//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::App;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::web;

use chrono::Utc;

use crate::domain::{
    BloodGroup, BloodRequest, DonorId, EmailAddress, Hospital, HospitalDraft, HospitalId,
    HospitalStatus, Inventory, Location, NewBloodRequest, OperatingHours, PhoneNumber, Principal,
};
use crate::domain::ports::{
    MockAccountCommand, MockBloodRequestCommand, MockBloodRequestQuery, MockDonorQuery,
    MockHospitalCommand, MockHospitalQuery, MockTokenService,
};

use super::error::json_config;
use super::state::HttpState;

/// Bearer value accepted by [`TestPorts::authenticated_as`].
pub const TEST_TOKEN: &str = "test-token";

/// Mocked driving ports. Unconfigured mocks panic when called.
#[derive(Default)]
pub struct TestPorts {
    /// Signup and login.
    pub accounts: MockAccountCommand,
    /// Donor profile reads.
    pub donors: MockDonorQuery,
    /// Hospital directory reads.
    pub hospitals: MockHospitalQuery,
    /// Inventory and review writes.
    pub hospital_commands: MockHospitalCommand,
    /// Request submission and decisions.
    pub requests: MockBloodRequestCommand,
    /// Request listings.
    pub request_queries: MockBloodRequestQuery,
    /// Bearer token verification.
    pub tokens: MockTokenService,
}

impl TestPorts {
    /// Ports whose token service resolves [`TEST_TOKEN`] to `principal`.
    pub fn authenticated_as(principal: Principal) -> Self {
        let mut ports = Self::default();
        ports
            .tokens
            .expect_verify()
            .withf(|token| token == TEST_TOKEN)
            .returning(move |_| Ok(principal.clone()));
        ports
    }

    /// Wrap the mocks as shared handler state.
    pub fn into_state(self) -> HttpState {
        HttpState {
            accounts: Arc::new(self.accounts),
            donors: Arc::new(self.donors),
            hospitals: Arc::new(self.hospitals),
            hospital_commands: Arc::new(self.hospital_commands),
            requests: Arc::new(self.requests),
            request_queries: Arc::new(self.request_queries),
            tokens: Arc::new(self.tokens),
        }
    }
}

/// `Authorization` header carrying [`TEST_TOKEN`].
pub fn bearer() -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {TEST_TOKEN}"))
}

/// App serving every `/api` route against `ports`.
pub fn test_app(
    ports: TestPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .app_data(json_config())
        .service(web::scope("/api").configure(super::api_routes))
}

/// An active hospital in Pune holding `inventory`.
pub fn sample_hospital(id: HospitalId, inventory: Inventory) -> Hospital {
    Hospital::from(HospitalDraft {
        id,
        hospital_name: "City General".to_owned(),
        email: EmailAddress::new("desk@citygeneral.org").expect("email"),
        phone: PhoneNumber::new("0201234567").expect("phone"),
        registration_number: "MH-1234".to_owned(),
        location: Location::new("Pune", "Maharashtra").expect("location"),
        inventory,
        status: HospitalStatus::Active,
        operating_hours: OperatingHours::default(),
        emergency_contact: None,
        reviews: Vec::new(),
        created_at: Utc::now(),
    })
}

/// A freshly submitted request for two units of B+.
pub fn sample_request(donor: DonorId, hospital: HospitalId) -> BloodRequest {
    let request =
        NewBloodRequest::new("Meera", BloodGroup::BPositive, 2, None).expect("valid request");
    BloodRequest::submit(request, donor, hospital, Utc::now())
}
