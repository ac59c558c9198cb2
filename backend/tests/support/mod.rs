//! In-memory adapters and app wiring shared by the HTTP integration suites.
//!
//! The repositories below stand in for the Diesel adapters so the real
//! services, token signing and password hashing run end to end without a
//! database.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::test as actix_test;
use actix_web::{App, web};
use async_trait::async_trait;
use chrono::Duration;
use mockable::{Clock, DefaultClock};
use serde_json::{Value, json};

use bloodbank::Trace;
use bloodbank::domain::ports::{
    BloodRequestRepository, BloodRequestRepositoryError, DonorRepository, DonorRepositoryError,
    HospitalListFilter, HospitalRepository, HospitalRepositoryError, PasswordHasher,
    RequestNotifier, TokenService,
};
use bloodbank::domain::{
    AccountCredentials, AccountService, BloodRequest, BloodRequestId, BloodRequestService, Donor,
    DonorId, DonorRequestView, DonorService, Hospital, HospitalId, HospitalRequestView,
    HospitalService, Inventory, PartySummary, PasswordHash, Review,
};
use bloodbank::inbound::http::state::HttpState;
use bloodbank::inbound::http::{api_routes, json_config};
use bloodbank::outbound::notify::TracingRequestNotifier;
use bloodbank::outbound::security::{Argon2PasswordHasher, JwtTokenService};

pub const PASSWORD: &str = "correct-horse-battery";

const TOKEN_SECRET: &[u8] = b"integration-suite-signing-secret-0123456789";

struct StoredAccount<T> {
    records: HashMap<uuid::Uuid, (T, PasswordHash)>,
}

impl<T> Default for StoredAccount<T> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
        }
    }
}

fn same_email(left: &str, right: &str) -> bool {
    left.trim().eq_ignore_ascii_case(right.trim())
}

#[derive(Default)]
pub struct InMemoryDonors {
    inner: Mutex<StoredAccount<Donor>>,
}

impl InMemoryDonors {
    fn summary(&self, id: &DonorId) -> Option<PartySummary> {
        let store = self.inner.lock().expect("donor store lock");
        store.records.get(id.as_uuid()).map(|(donor, _)| PartySummary {
            id: *donor.id().as_uuid(),
            name: donor.name().to_owned(),
            email: donor.email().to_string(),
            phone: donor.phone().as_ref().to_owned(),
        })
    }
}

#[async_trait]
impl DonorRepository for InMemoryDonors {
    async fn insert(
        &self,
        donor: &Donor,
        password_hash: &PasswordHash,
    ) -> Result<(), DonorRepositoryError> {
        let mut store = self.inner.lock().expect("donor store lock");
        let email = donor.email().to_string();
        if store
            .records
            .values()
            .any(|(existing, _)| same_email(existing.email().as_ref(), &email))
        {
            return Err(DonorRepositoryError::duplicate_email(email));
        }
        store
            .records
            .insert(*donor.id().as_uuid(), (donor.clone(), password_hash.clone()));
        Ok(())
    }

    async fn find_by_id(&self, id: &DonorId) -> Result<Option<Donor>, DonorRepositoryError> {
        let store = self.inner.lock().expect("donor store lock");
        Ok(store.records.get(id.as_uuid()).map(|(donor, _)| donor.clone()))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountCredentials>, DonorRepositoryError> {
        let store = self.inner.lock().expect("donor store lock");
        Ok(store
            .records
            .values()
            .find(|(donor, _)| same_email(donor.email().as_ref(), email))
            .map(|(donor, hash)| AccountCredentials {
                id: *donor.id().as_uuid(),
                name: donor.name().to_owned(),
                email: donor.email().clone(),
                password_hash: hash.clone(),
            }))
    }
}

#[derive(Default)]
pub struct InMemoryHospitals {
    inner: Mutex<StoredAccount<Hospital>>,
}

impl InMemoryHospitals {
    fn summary(&self, id: &HospitalId) -> Option<PartySummary> {
        let store = self.inner.lock().expect("hospital store lock");
        store.records.get(id.as_uuid()).map(|(hospital, _)| PartySummary {
            id: *hospital.id().as_uuid(),
            name: hospital.hospital_name().to_owned(),
            email: hospital.email().to_string(),
            phone: hospital.phone().as_ref().to_owned(),
        })
    }

    fn update<F>(&self, id: &HospitalId, apply: F) -> Result<(), HospitalRepositoryError>
    where
        F: FnOnce(&mut Hospital),
    {
        let mut store = self.inner.lock().expect("hospital store lock");
        let (hospital, _) = store
            .records
            .get_mut(id.as_uuid())
            .ok_or_else(|| HospitalRepositoryError::query(format!("hospital {id} not stored")))?;
        apply(hospital);
        Ok(())
    }
}

#[async_trait]
impl HospitalRepository for InMemoryHospitals {
    async fn insert(
        &self,
        hospital: &Hospital,
        password_hash: &PasswordHash,
    ) -> Result<(), HospitalRepositoryError> {
        let mut store = self.inner.lock().expect("hospital store lock");
        let email = hospital.email().to_string();
        if store
            .records
            .values()
            .any(|(existing, _)| same_email(existing.email().as_ref(), &email))
        {
            return Err(HospitalRepositoryError::duplicate_email(email));
        }
        store.records.insert(
            *hospital.id().as_uuid(),
            (hospital.clone(), password_hash.clone()),
        );
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &HospitalId,
    ) -> Result<Option<Hospital>, HospitalRepositoryError> {
        let store = self.inner.lock().expect("hospital store lock");
        Ok(store
            .records
            .get(id.as_uuid())
            .map(|(hospital, _)| hospital.clone()))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountCredentials>, HospitalRepositoryError> {
        let store = self.inner.lock().expect("hospital store lock");
        Ok(store
            .records
            .values()
            .find(|(hospital, _)| same_email(hospital.email().as_ref(), email))
            .map(|(hospital, hash)| AccountCredentials {
                id: *hospital.id().as_uuid(),
                name: hospital.hospital_name().to_owned(),
                email: hospital.email().clone(),
                password_hash: hash.clone(),
            }))
    }

    async fn list(
        &self,
        filter: &HospitalListFilter,
    ) -> Result<Vec<Hospital>, HospitalRepositoryError> {
        let store = self.inner.lock().expect("hospital store lock");
        let mut hospitals: Vec<Hospital> = store
            .records
            .values()
            .map(|(hospital, _)| hospital.clone())
            .filter(|hospital| filter.matches(hospital))
            .collect();
        hospitals.sort_by(|a, b| a.hospital_name().cmp(b.hospital_name()));
        Ok(hospitals)
    }

    async fn save_inventory(
        &self,
        id: &HospitalId,
        inventory: &Inventory,
    ) -> Result<(), HospitalRepositoryError> {
        self.update(id, |hospital| *hospital.inventory_mut() = *inventory)
    }

    async fn add_review(
        &self,
        id: &HospitalId,
        review: &Review,
    ) -> Result<(), HospitalRepositoryError> {
        self.update(id, |hospital| hospital.prepend_review(review.clone()))
    }
}

/// Request store joined against the account stores for the read views.
pub struct InMemoryRequests {
    donors: Arc<InMemoryDonors>,
    hospitals: Arc<InMemoryHospitals>,
    requests: Mutex<Vec<BloodRequest>>,
}

impl InMemoryRequests {
    fn new(donors: Arc<InMemoryDonors>, hospitals: Arc<InMemoryHospitals>) -> Self {
        Self {
            donors,
            hospitals,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn matching<P>(&self, predicate: P) -> Vec<BloodRequest>
    where
        P: Fn(&BloodRequest) -> bool,
    {
        let requests = self.requests.lock().expect("request store lock");
        let mut found: Vec<BloodRequest> =
            requests.iter().filter(|r| predicate(r)).cloned().collect();
        found.sort_by(|a, b| b.request_date().cmp(&a.request_date()));
        found
    }
}

fn missing_party(kind: &str, id: impl std::fmt::Display) -> BloodRequestRepositoryError {
    BloodRequestRepositoryError::query(format!("{kind} {id} not stored"))
}

#[async_trait]
impl BloodRequestRepository for InMemoryRequests {
    async fn insert(&self, request: &BloodRequest) -> Result<(), BloodRequestRepositoryError> {
        self.requests
            .lock()
            .expect("request store lock")
            .push(request.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &BloodRequestId,
    ) -> Result<Option<BloodRequest>, BloodRequestRepositoryError> {
        let requests = self.requests.lock().expect("request store lock");
        Ok(requests.iter().find(|request| request.id() == *id).cloned())
    }

    async fn list_for_donor(
        &self,
        donor: &DonorId,
    ) -> Result<Vec<DonorRequestView>, BloodRequestRepositoryError> {
        self.matching(|request| request.donor_id() == *donor)
            .into_iter()
            .map(|request| {
                let hospital = self
                    .hospitals
                    .summary(&request.hospital_id())
                    .ok_or_else(|| missing_party("hospital", request.hospital_id()))?;
                Ok(DonorRequestView { request, hospital })
            })
            .collect()
    }

    async fn list_for_hospital(
        &self,
        hospital: &HospitalId,
    ) -> Result<Vec<HospitalRequestView>, BloodRequestRepositoryError> {
        self.matching(|request| request.hospital_id() == *hospital)
            .into_iter()
            .map(|request| {
                let donor = self
                    .donors
                    .summary(&request.donor_id())
                    .ok_or_else(|| missing_party("donor", request.donor_id()))?;
                Ok(HospitalRequestView { request, donor })
            })
            .collect()
    }

    async fn save_status(&self, request: &BloodRequest) -> Result<(), BloodRequestRepositoryError> {
        let mut requests = self.requests.lock().expect("request store lock");
        let stored = requests
            .iter_mut()
            .find(|existing| existing.id() == request.id())
            .ok_or_else(|| missing_party("request", request.id()))?;
        *stored = request.clone();
        Ok(())
    }
}

/// HTTP state wired to in-memory stores and the real security adapters.
pub fn in_memory_state() -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let donors = Arc::new(InMemoryDonors::default());
    let hospitals = Arc::new(InMemoryHospitals::default());
    let requests = Arc::new(InMemoryRequests::new(donors.clone(), hospitals.clone()));

    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(
        TOKEN_SECRET,
        Duration::hours(1),
        clock.clone(),
    ));
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let notifier: Arc<dyn RequestNotifier> = Arc::new(TracingRequestNotifier::new());

    let hospital_service = Arc::new(HospitalService::new(hospitals.clone(), clock.clone()));
    let request_service = Arc::new(BloodRequestService::new(
        hospitals.clone(),
        donors.clone(),
        requests.clone(),
        notifier,
        clock.clone(),
    ));

    HttpState {
        accounts: Arc::new(AccountService::new(
            donors.clone(),
            hospitals,
            hasher,
            tokens.clone(),
            clock.clone(),
        )),
        donors: Arc::new(DonorService::new(donors, requests, clock)),
        hospitals: hospital_service.clone(),
        hospital_commands: hospital_service,
        requests: request_service.clone(),
        request_queries: request_service,
        tokens,
    }
}

/// Initialise the `/api` routes over a fresh in-memory state.
pub async fn init_app() -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(in_memory_state()))
            .app_data(json_config())
            .wrap(Trace)
            .service(web::scope("/api").configure(api_routes)),
    )
    .await
}

pub fn donor_registration(email: &str) -> Value {
    json!({
        "name": "Asha Rao",
        "email": email,
        "phone": "9876543210",
        "password": PASSWORD,
        "bloodGroup": "O+",
        "location": { "city": "Pune", "state": "MH" }
    })
}

pub fn hospital_registration(email: &str, name: &str, city: &str) -> Value {
    json!({
        "hospitalName": name,
        "email": email,
        "phone": "02012345678",
        "password": PASSWORD,
        "registrationNumber": format!("REG-{name}"),
        "location": { "city": city, "state": "MH" }
    })
}

/// Send a JSON request, optionally with a bearer token, and decode the reply.
pub async fn call_json<S, B>(
    app: &S,
    method: actix_web::http::Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (u16, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let mut request = actix_test::TestRequest::default().method(method).uri(uri);
    if let Some(token) = token {
        request = request.insert_header((header::AUTHORIZATION, format!("Bearer {token}")));
    }
    if let Some(body) = body {
        request = request.set_json(body);
    }
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status().as_u16();
    let bytes = actix_test::read_body(response).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body should be JSON")
    };
    (status, value)
}

/// Register an account and return its id.
pub async fn register<S, B>(app: &S, path: &str, body: Value) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, value) =
        call_json(app, actix_web::http::Method::POST, path, None, Some(body)).await;
    assert_eq!(status, 201, "registration failed: {value}");
    value["id"].as_str().expect("id").to_owned()
}

/// Log in and return the bearer token.
pub async fn login<S, B>(app: &S, email: &str, user_type: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, value) = call_json(
        app,
        actix_web::http::Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": PASSWORD, "userType": user_type })),
    )
    .await;
    assert_eq!(status, 200, "login failed: {value}");
    value["token"].as_str().expect("token").to_owned()
}
