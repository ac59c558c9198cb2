//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`], [`TokenService`],
//! [`RequestNotifier`]) are implemented by outbound adapters. Driving ports
//! (`*Command`, `*Query`) are implemented by domain services and consumed by
//! inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod blood_request_command;
mod blood_request_query;
mod blood_request_repository;
mod donor_query;
mod donor_repository;
mod hospital_command;
mod hospital_query;
mod hospital_repository;
mod password_hasher;
mod request_notifier;
mod token_service;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::{AccountCommand, LoginSession};
#[cfg(test)]
pub use blood_request_command::MockBloodRequestCommand;
pub use blood_request_command::{BloodRequestCommand, StatusUpdate};
#[cfg(test)]
pub use blood_request_query::MockBloodRequestQuery;
pub use blood_request_query::{BloodRequestQuery, HospitalRequests};
#[cfg(test)]
pub use blood_request_repository::MockBloodRequestRepository;
pub use blood_request_repository::{BloodRequestRepository, BloodRequestRepositoryError};
pub use donor_query::DonorQuery;
#[cfg(test)]
pub use donor_query::MockDonorQuery;
#[cfg(test)]
pub use donor_repository::MockDonorRepository;
pub use donor_repository::{DonorRepository, DonorRepositoryError};
pub use hospital_command::HospitalCommand;
#[cfg(test)]
pub use hospital_command::MockHospitalCommand;
pub use hospital_command::NewReview;
pub use hospital_query::HospitalQuery;
#[cfg(test)]
pub use hospital_query::MockHospitalQuery;
#[cfg(test)]
pub use hospital_repository::MockHospitalRepository;
pub use hospital_repository::{HospitalListFilter, HospitalRepository, HospitalRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use request_notifier::MockRequestNotifier;
pub use request_notifier::{BloodRequestNotice, RequestNotifier, RequestNotifierError};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{IssuedToken, TokenService, TokenServiceError};
