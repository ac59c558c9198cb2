//! Mapping of repository port errors onto domain errors.
//!
//! Donor and hospital stores share one failure shape. Services differ only
//! in how a duplicate email is reported: signup turns it into a conflict,
//! everything else treats it as an internal fault.

use crate::domain::Error;
use crate::domain::ports::{BloodRequestRepositoryError, DonorRepositoryError, HospitalRepositoryError};

/// Failure raised by an account store, tagged with the store it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AccountStoreFailure {
    Connection { store: &'static str, message: String },
    Query { store: &'static str, message: String },
    DuplicateEmail { email: String },
}

impl From<DonorRepositoryError> for AccountStoreFailure {
    fn from(error: DonorRepositoryError) -> Self {
        const STORE: &str = "donor";
        match error {
            DonorRepositoryError::Connection { message } => Self::Connection { store: STORE, message },
            DonorRepositoryError::Query { message } => Self::Query { store: STORE, message },
            DonorRepositoryError::DuplicateEmail { email } => Self::DuplicateEmail { email },
        }
    }
}

impl From<HospitalRepositoryError> for AccountStoreFailure {
    fn from(error: HospitalRepositoryError) -> Self {
        const STORE: &str = "hospital";
        match error {
            HospitalRepositoryError::Connection { message } => {
                Self::Connection { store: STORE, message }
            }
            HospitalRepositoryError::Query { message } => Self::Query { store: STORE, message },
            HospitalRepositoryError::DuplicateEmail { email } => Self::DuplicateEmail { email },
        }
    }
}

/// Map an account store failure, delegating duplicate emails to the caller.
pub(crate) fn map_account_error<E>(error: E, duplicate_email: fn(&str) -> Error) -> Error
where
    E: Into<AccountStoreFailure>,
{
    match error.into() {
        AccountStoreFailure::Connection { store, message } => {
            Error::service_unavailable(format!("{store} repository unavailable: {message}"))
        }
        AccountStoreFailure::Query { store, message } => {
            Error::internal(format!("{store} repository error: {message}"))
        }
        AccountStoreFailure::DuplicateEmail { email } => duplicate_email(&email),
    }
}

/// Duplicate emails can only come from inserts; elsewhere they are a fault.
pub(crate) fn unexpected_duplicate_email(email: &str) -> Error {
    Error::internal(format!("unexpected duplicate account email: {email}"))
}

/// Map an account store failure raised outside signup.
pub(crate) fn map_lookup_error<E>(error: E) -> Error
where
    E: Into<AccountStoreFailure>,
{
    map_account_error(error, unexpected_duplicate_email)
}

pub(crate) fn map_request_error(error: BloodRequestRepositoryError) -> Error {
    match error {
        BloodRequestRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("blood request repository unavailable: {message}"))
        }
        BloodRequestRepositoryError::Query { message } => {
            Error::internal(format!("blood request repository error: {message}"))
        }
    }
}
