//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every client-caused failure becomes `invalid_request` with
//! `details {field, code}` and, where useful, the rejected `value`.

use std::str::FromStr;

use serde_json::json;

use crate::domain::{
    BloodGroup, BloodRequestValidationError, Error, IdValidationError, InventoryPatchError,
    LoginValidationError, Priority, RegistrationValidationError, RequestStatus,
    ReviewValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidId,
    InvalidBloodGroup,
    InvalidPriority,
    InvalidStatus,
    InvalidUnits,
    InvalidRating,
    InvalidInventory,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidId => "invalid_id",
            Self::InvalidBloodGroup => "invalid_blood_group",
            Self::InvalidPriority => "invalid_priority",
            Self::InvalidStatus => "invalid_status",
            Self::InvalidUnits => "invalid_units",
            Self::InvalidRating => "invalid_rating",
            Self::InvalidInventory => "invalid_inventory",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: &str, message: impl Into<String>, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

fn value_error(field: &str, message: impl Into<String>, code: &str, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "value": value,
        "code": code,
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    field_error(
        field,
        format!("missing required field: {field}"),
        ErrorCode::MissingField.as_str(),
    )
}

/// Require an optional body field to be present and non-blank.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error>
where
    T: AsRef<str>,
{
    value
        .filter(|v| !v.as_ref().trim().is_empty())
        .ok_or_else(|| missing_field_error(field))
}

/// Parse an identifier from a path segment.
pub(crate) fn parse_id<T>(value: &str, field: FieldName) -> Result<T, Error>
where
    T: FromStr<Err = IdValidationError>,
{
    T::from_str(value).map_err(|err| {
        let field = field.as_str();
        value_error(
            field,
            format!("{field} {err}"),
            ErrorCode::InvalidId.as_str(),
            value,
        )
    })
}

pub(crate) fn parse_blood_group(value: &str, field: FieldName) -> Result<BloodGroup, Error> {
    value.trim().to_ascii_uppercase().parse().map_err(|err| {
        value_error(
            field.as_str(),
            format!("{err}"),
            ErrorCode::InvalidBloodGroup.as_str(),
            value,
        )
    })
}

pub(crate) fn parse_priority(value: &str) -> Result<Priority, Error> {
    value.trim().to_ascii_uppercase().parse().map_err(|err| {
        value_error(
            "priority",
            format!("{err}"),
            ErrorCode::InvalidPriority.as_str(),
            value,
        )
    })
}

pub(crate) fn parse_status(value: &str) -> Result<RequestStatus, Error> {
    value.trim().to_ascii_uppercase().parse().map_err(|err| {
        value_error(
            "status",
            format!("{err}"),
            ErrorCode::InvalidStatus.as_str(),
            value,
        )
    })
}

/// Units must be a positive integer that fits a counter.
pub(crate) fn parse_units(value: i64, field: FieldName) -> Result<u32, Error> {
    u32::try_from(value)
        .ok()
        .filter(|units| *units > 0)
        .ok_or_else(|| {
            Error::invalid_request(format!("{} must be a positive integer", field.as_str()))
                .with_details(json!({
                    "field": field.as_str(),
                    "value": value,
                    "code": ErrorCode::InvalidUnits.as_str(),
                }))
        })
}

pub(crate) fn map_login_error(err: LoginValidationError) -> Error {
    let field = match err {
        LoginValidationError::EmptyEmail => "email",
        LoginValidationError::EmptyPassword => "password",
    };
    field_error(field, err.to_string(), ErrorCode::MissingField.as_str())
}

pub(crate) fn map_registration_error(err: RegistrationValidationError) -> Error {
    field_error(err.field(), err.to_string(), err.code())
}

pub(crate) fn map_blood_request_error(err: BloodRequestValidationError) -> Error {
    let (field, code) = match &err {
        BloodRequestValidationError::EmptyPatientName => {
            ("patientName", ErrorCode::MissingField)
        }
        BloodRequestValidationError::ZeroUnits => ("unitsRequired", ErrorCode::InvalidUnits),
        BloodRequestValidationError::UnknownPriority { .. } => {
            ("priority", ErrorCode::InvalidPriority)
        }
        BloodRequestValidationError::UnknownStatus { .. } => ("status", ErrorCode::InvalidStatus),
    };
    field_error(field, err.to_string(), code.as_str())
}

pub(crate) fn map_inventory_error(err: InventoryPatchError) -> Error {
    field_error(err.key(), err.to_string(), ErrorCode::InvalidInventory.as_str())
}

pub(crate) fn map_review_error(err: ReviewValidationError) -> Error {
    let field = match err {
        ReviewValidationError::RatingOutOfRange { .. } => "rating",
        ReviewValidationError::EmptyReviewer => "userName",
    };
    field_error(field, err.to_string(), ErrorCode::InvalidRating.as_str())
}
