//! Tests for the account service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{
    DonorRepositoryError, HospitalRepositoryError, IssuedToken, MockDonorRepository,
    MockHospitalRepository, MockPasswordHasher, MockTokenService,
};
use crate::domain::{
    DonorRegistrationFields, EmailAddress, ErrorCode, HospitalRegistrationFields, PasswordHash,
};
use chrono::{DateTime, TimeZone, Utc};
use mockable::MockClock;
use rstest::{fixture, rstest};
use uuid::Uuid;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
fn clock() -> MockClock {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(now());
    clock
}

struct Mocks {
    donors: MockDonorRepository,
    hospitals: MockHospitalRepository,
    hasher: MockPasswordHasher,
    tokens: MockTokenService,
    clock: MockClock,
}

#[fixture]
fn mocks(clock: MockClock) -> Mocks {
    Mocks {
        donors: MockDonorRepository::new(),
        hospitals: MockHospitalRepository::new(),
        hasher: MockPasswordHasher::new(),
        tokens: MockTokenService::new(),
        clock,
    }
}

fn make_service(
    mocks: Mocks,
) -> AccountService<MockDonorRepository, MockHospitalRepository> {
    AccountService::new(
        Arc::new(mocks.donors),
        Arc::new(mocks.hospitals),
        Arc::new(mocks.hasher),
        Arc::new(mocks.tokens),
        Arc::new(mocks.clock),
    )
}

fn donor_registration() -> DonorRegistration {
    DonorRegistration::try_from_fields(DonorRegistrationFields {
        name: "Ravi Kumar",
        email: "ravi@example.org",
        phone: "9876543210",
        password: "hunter22",
        blood_group: "O+",
        city: "Pune",
        state: "Maharashtra",
    })
    .expect("valid registration")
}

fn hospital_registration() -> HospitalRegistration {
    HospitalRegistration::try_from_fields(HospitalRegistrationFields {
        hospital_name: "City General",
        email: "desk@citygeneral.org",
        phone: "0201234567",
        password: "longenough",
        registration_number: "REG-1",
        city: "Pune",
        state: "Maharashtra",
        ..HospitalRegistrationFields::default()
    })
    .expect("valid registration")
}

fn stored_credentials(id: Uuid) -> AccountCredentials {
    AccountCredentials {
        id,
        name: "Ravi Kumar".to_owned(),
        email: EmailAddress::new("ravi@example.org").expect("email"),
        password_hash: PasswordHash::new("$argon2id$stored"),
    }
}

#[rstest]
#[tokio::test]
async fn register_donor_hashes_password_and_inserts(mut mocks: Mocks) {
    mocks
        .hasher
        .expect_hash()
        .withf(|password| password == "hunter22")
        .times(1)
        .return_once(|_| Ok(PasswordHash::new("$argon2id$hashed")));
    mocks
        .donors
        .expect_insert()
        .withf(|donor, hash| {
            donor.email().as_ref() == "ravi@example.org"
                && donor.created_at() == now()
                && donor.last_donation().is_none()
                && hash.as_str() == "$argon2id$hashed"
        })
        .times(1)
        .return_once(|_, _| Ok(()));

    let service = make_service(mocks);
    service
        .register_donor(donor_registration())
        .await
        .expect("registration succeeds");
}

#[rstest]
#[tokio::test]
async fn register_donor_maps_duplicate_email_to_conflict(mut mocks: Mocks) {
    mocks
        .hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordHash::new("$argon2id$hashed")));
    mocks
        .donors
        .expect_insert()
        .return_once(|_, _| Err(DonorRepositoryError::duplicate_email("ravi@example.org")));

    let service = make_service(mocks);
    let error = service
        .register_donor(donor_registration())
        .await
        .expect_err("duplicate email");
    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(
        error.details().and_then(|d| d.get("field")),
        Some(&json!("email"))
    );
}

#[rstest]
#[tokio::test]
async fn register_hospital_starts_with_empty_active_inventory(mut mocks: Mocks) {
    mocks
        .hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordHash::new("$argon2id$hashed")));
    mocks
        .hospitals
        .expect_insert()
        .withf(|hospital, _| {
            *hospital.inventory() == Inventory::default()
                && hospital.status() == HospitalStatus::Active
                && hospital.reviews().is_empty()
        })
        .times(1)
        .return_once(|_, _| Ok(()));

    let service = make_service(mocks);
    service
        .register_hospital(hospital_registration())
        .await
        .expect("registration succeeds");
}

#[rstest]
#[case(
    HospitalRepositoryError::connection("refused"),
    ErrorCode::ServiceUnavailable
)]
#[case(HospitalRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[case(
    HospitalRepositoryError::duplicate_email("desk@citygeneral.org"),
    ErrorCode::Conflict
)]
#[tokio::test]
async fn register_hospital_maps_repository_errors(
    mut mocks: Mocks,
    #[case] failure: HospitalRepositoryError,
    #[case] expected: ErrorCode,
) {
    mocks
        .hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordHash::new("$argon2id$hashed")));
    mocks
        .hospitals
        .expect_insert()
        .return_once(move |_, _| Err(failure));

    let service = make_service(mocks);
    let error = service
        .register_hospital(hospital_registration())
        .await
        .expect_err("repository failure");
    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn login_issues_token_for_matching_password(mut mocks: Mocks) {
    let id = Uuid::new_v4();
    mocks
        .donors
        .expect_find_credentials_by_email()
        .withf(|email| email == "ravi@example.org")
        .return_once(move |_| Ok(Some(stored_credentials(id))));
    mocks.hasher.expect_verify().return_once(|_, _| Ok(true));
    mocks
        .tokens
        .expect_issue()
        .withf(move |principal| principal.id() == id && principal.kind() == AccountKind::Donor)
        .return_once(|_| {
            Ok(IssuedToken {
                token: "signed".to_owned(),
                expires_at: now(),
            })
        });

    let service = make_service(mocks);
    let credentials =
        LoginCredentials::try_from_parts("Ravi@Example.org", "hunter22", AccountKind::Donor)
            .expect("credentials");
    let session = service.login(&credentials).await.expect("login succeeds");

    assert_eq!(session.token, "signed");
    assert_eq!(session.id, id);
    assert_eq!(session.kind, AccountKind::Donor);
    assert_eq!(session.name, "Ravi Kumar");
}

#[rstest]
#[tokio::test]
async fn login_rejects_wrong_password(mut mocks: Mocks) {
    let id = Uuid::new_v4();
    mocks
        .hospitals
        .expect_find_credentials_by_email()
        .return_once(move |_| Ok(Some(stored_credentials(id))));
    mocks.hasher.expect_verify().return_once(|_, _| Ok(false));
    mocks.tokens.expect_issue().never();

    let service = make_service(mocks);
    let credentials =
        LoginCredentials::try_from_parts("ravi@example.org", "nope", AccountKind::Hospital)
            .expect("credentials");
    let error = service.login(&credentials).await.expect_err("wrong password");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), INVALID_CREDENTIALS);
}

#[rstest]
#[tokio::test]
async fn login_for_unknown_email_still_verifies_a_password(mut mocks: Mocks) {
    mocks
        .donors
        .expect_find_credentials_by_email()
        .return_once(|_| Ok(None));
    mocks
        .hasher
        .expect_verify()
        .withf(|password, hash| password == "whatever" && hash.as_str() == UNKNOWN_ACCOUNT_HASH)
        .times(1)
        .return_once(|_, _| Ok(false));
    mocks.tokens.expect_issue().never();

    let service = make_service(mocks);
    let credentials =
        LoginCredentials::try_from_parts("ghost@example.org", "whatever", AccountKind::Donor)
            .expect("credentials");
    let error = service.login(&credentials).await.expect_err("unknown email");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), INVALID_CREDENTIALS);
}
