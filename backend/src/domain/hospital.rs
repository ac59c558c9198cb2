//! Hospitals, their operating details and blood inventory.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::{EmailAddress, HospitalId, Inventory, Location, PhoneNumber, Review};

/// Validation errors for hospital-specific fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HospitalValidationError {
    /// A time was not in `HH:MM` form.
    InvalidTime { value: String },
    /// A status string named no known status.
    UnknownStatus { value: String },
}

impl fmt::Display for HospitalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTime { value } => {
                write!(f, "operating hours must use HH:MM (got '{value}')")
            }
            Self::UnknownStatus { value } => write!(
                f,
                "hospital status must be ACTIVE, INACTIVE or PENDING (got '{value}')"
            ),
        }
    }
}

impl std::error::Error for HospitalValidationError {}

/// Administrative state of a hospital account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HospitalStatus {
    /// Awaiting activation.
    #[default]
    Active,
    /// Hidden from the directory.
    Inactive,
    /// Awaiting activation.
    Pending,
}

impl HospitalStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Pending => "PENDING",
        }
    }
}

impl FromStr for HospitalStatus {
    type Err = HospitalValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            "PENDING" => Ok(Self::Pending),
            other => Err(HospitalValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

static TIME_RE: OnceLock<Regex> = OnceLock::new();

fn time_regex() -> &'static Regex {
    TIME_RE.get_or_init(|| {
        Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$")
            .unwrap_or_else(|error| panic!("time regex failed to compile: {error}"))
    })
}

/// Opening and closing times as `HH:MM` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingHours {
    open: String,
    close: String,
}

impl Default for OperatingHours {
    fn default() -> Self {
        Self {
            open: "09:00".to_owned(),
            close: "18:00".to_owned(),
        }
    }
}

impl OperatingHours {
    /// Build hours from optional parts, defaulting each missing side.
    ///
    /// # Examples
    /// ```
    /// use bloodbank::domain::OperatingHours;
    ///
    /// let hours = OperatingHours::from_parts(None, Some("20:30")).unwrap();
    /// assert_eq!(hours.open(), "09:00");
    /// assert_eq!(hours.close(), "20:30");
    /// ```
    pub fn from_parts(
        open: Option<&str>,
        close: Option<&str>,
    ) -> Result<Self, HospitalValidationError> {
        let defaults = Self::default();
        Ok(Self {
            open: open.map_or(Ok(defaults.open), parse_time)?,
            close: close.map_or(Ok(defaults.close), parse_time)?,
        })
    }

    /// Opening time as `HH:MM`.
    #[must_use]
    pub fn open(&self) -> &str {
        &self.open
    }

    /// Closing time as `HH:MM`.
    #[must_use]
    pub fn close(&self) -> &str {
        &self.close
    }
}

fn parse_time(value: &str) -> Result<String, HospitalValidationError> {
    let trimmed = value.trim();
    if time_regex().is_match(trimmed) {
        Ok(trimmed.to_owned())
    } else {
        Err(HospitalValidationError::InvalidTime {
            value: value.to_owned(),
        })
    }
}

/// Person to call in an emergency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    /// Contact name.
    pub name: String,
    /// Contact phone.
    pub phone: PhoneNumber,
}

/// Fields of a hospital record. The password hash is held by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HospitalDraft {
    /// Hospital identifier.
    pub id: HospitalId,
    /// Display name.
    pub hospital_name: String,
    /// Login email, unique across hospitals.
    pub email: EmailAddress,
    /// Front desk phone.
    pub phone: PhoneNumber,
    /// Official registration number.
    pub registration_number: String,
    /// City and state.
    pub location: Location,
    /// Units held per blood group.
    pub inventory: Inventory,
    /// Administrative state.
    pub status: HospitalStatus,
    /// Daily opening hours.
    pub operating_hours: OperatingHours,
    /// Optional emergency contact.
    pub emergency_contact: Option<EmergencyContact>,
    /// Reviews, newest first.
    pub reviews: Vec<Review>,
    /// Signup time.
    pub created_at: DateTime<Utc>,
}

/// Registered hospital.
///
/// `reviews` is ordered newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    id: HospitalId,
    hospital_name: String,
    email: EmailAddress,
    phone: PhoneNumber,
    registration_number: String,
    location: Location,
    inventory: Inventory,
    status: HospitalStatus,
    operating_hours: OperatingHours,
    #[serde(skip_serializing_if = "Option::is_none")]
    emergency_contact: Option<EmergencyContact>,
    reviews: Vec<Review>,
    created_at: DateTime<Utc>,
}

impl From<HospitalDraft> for Hospital {
    fn from(draft: HospitalDraft) -> Self {
        let HospitalDraft {
            id,
            hospital_name,
            email,
            phone,
            registration_number,
            location,
            inventory,
            status,
            operating_hours,
            emergency_contact,
            mut reviews,
            created_at,
        } = draft;
        reviews.sort_by(|a, b| b.date().cmp(&a.date()));
        Self {
            id,
            hospital_name,
            email,
            phone,
            registration_number,
            location,
            inventory,
            status,
            operating_hours,
            emergency_contact,
            reviews,
            created_at,
        }
    }
}

impl Hospital {
    /// Hospital identifier.
    #[must_use]
    pub fn id(&self) -> HospitalId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn hospital_name(&self) -> &str {
        &self.hospital_name
    }

    /// Login email.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Front desk phone.
    #[must_use]
    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    /// Official registration number.
    #[must_use]
    pub fn registration_number(&self) -> &str {
        &self.registration_number
    }

    /// City and state.
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Units held per blood group.
    #[must_use]
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Administrative state.
    #[must_use]
    pub fn status(&self) -> HospitalStatus {
        self.status
    }

    /// Daily opening hours.
    #[must_use]
    pub fn operating_hours(&self) -> &OperatingHours {
        &self.operating_hours
    }

    /// Emergency contact, if one was given.
    #[must_use]
    pub fn emergency_contact(&self) -> Option<&EmergencyContact> {
        self.emergency_contact.as_ref()
    }

    /// Reviews, newest first.
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Signup time.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Mutable inventory access for merge updates.
    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// Insert `review` at the front of the list.
    pub fn prepend_review(&mut self, review: Review) {
        self.reviews.insert(0, review);
    }
}
