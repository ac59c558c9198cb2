//! Strongly typed identifiers for donors, hospitals and blood requests.
//!
//! All identifiers are UUIDs on the wire and in storage. Separate newtypes
//! keep a hospital id from being passed where a donor id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation error raised when parsing an identifier from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdValidationError {
    /// The identifier was blank.
    Empty,
    /// The identifier was not a UUID.
    Invalid,
}

impl fmt::Display for IdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "identifier must not be empty"),
            Self::Invalid => write!(f, "identifier must be a valid UUID"),
        }
    }
}

impl std::error::Error for IdValidationError {}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Parse an identifier from its textual UUID form.
            pub fn new(id: impl AsRef<str>) -> Result<Self, IdValidationError> {
                let raw = id.as_ref();
                if raw.is_empty() {
                    return Err(IdValidationError::Empty);
                }
                if raw.trim() != raw {
                    return Err(IdValidationError::Invalid);
                }
                Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| IdValidationError::Invalid)
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Generate a new random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Access the underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

define_id!(
    /// Identifier of a registered individual donor.
    DonorId
);
define_id!(
    /// Identifier of a registered hospital.
    HospitalId
);
define_id!(
    /// Identifier of a blood request.
    BloodRequestId
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", IdValidationError::Empty)]
    #[case("nope", IdValidationError::Invalid)]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", IdValidationError::Invalid)]
    fn rejects_malformed_ids(#[case] raw: &str, #[case] expected: IdValidationError) {
        assert_eq!(DonorId::new(raw).expect_err("invalid id"), expected);
    }

    #[rstest]
    fn serialises_as_plain_uuid_string() {
        let id = HospitalId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
        let value = serde_json::to_value(id).expect("serialise");
        assert_eq!(value, serde_json::json!("3fa85f64-5717-4562-b3fc-2c963f66afa6"));
    }
}
