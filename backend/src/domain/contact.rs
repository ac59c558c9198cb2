//! Contact value types shared by donors and hospitals.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validation errors for contact details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    /// Email was blank.
    EmptyEmail,
    /// Email did not look like `local@domain`.
    InvalidEmail,
    /// Phone was blank.
    EmptyPhone,
    /// Phone contained something other than digits.
    InvalidPhone,
    /// City was blank.
    EmptyCity,
    /// State was blank.
    EmptyState,
}

impl fmt::Display for ContactValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must look like name@example.org"),
            Self::EmptyPhone => write!(f, "phone must not be empty"),
            Self::InvalidPhone => write!(f, "phone must contain digits only"),
            Self::EmptyCity => write!(f, "city must not be empty"),
            Self::EmptyState => write!(f, "state must not be empty"),
        }
    }
}

impl std::error::Error for ContactValidationError {}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new(r"^[0-9]{6,15}$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

/// Account email, trimmed and lower-cased.
///
/// # Examples
/// ```
/// use bloodbank::domain::EmailAddress;
///
/// let email = EmailAddress::new("  Ada@Example.ORG ").unwrap();
/// assert_eq!(email.as_ref(), "ada@example.org");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Trim, lower-case and check the address shape.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ContactValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(ContactValidationError::EmptyEmail);
        }
        if !email_regex().is_match(&normalised) {
            return Err(ContactValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = ContactValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Phone number made of digits only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Trim and check the number is all digits.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ContactValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ContactValidationError::EmptyPhone);
        }
        if !phone_regex().is_match(trimmed) {
            return Err(ContactValidationError::InvalidPhone);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ContactValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

/// City and state of a donor or hospital.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    city: String,
    state: String,
}

impl Location {
    /// Trim both parts and require them to be non-empty.
    pub fn new(
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> Result<Self, ContactValidationError> {
        let city = city.into().trim().to_owned();
        let state = state.into().trim().to_owned();
        if city.is_empty() {
            return Err(ContactValidationError::EmptyCity);
        }
        if state.is_empty() {
            return Err(ContactValidationError::EmptyState);
        }
        Ok(Self { city, state })
    }

    /// City as entered at registration, trimmed.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// State as entered at registration, trimmed.
    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Folded form of a city name used for case-insensitive search.
    ///
    /// Stored alongside the city so database lookups fold case exactly as
    /// this function does, independent of the database collation.
    ///
    /// # Examples
    ///
    /// ```
    /// use bloodbank::domain::Location;
    ///
    /// assert_eq!(Location::city_key(" ÉVORA "), "évora");
    /// ```
    #[must_use]
    pub fn city_key(city: &str) -> String {
        city.trim().to_lowercase()
    }

    /// Case-insensitive city comparison used by hospital search.
    #[must_use]
    pub fn is_in_city(&self, city: &str) -> bool {
        Self::city_key(&self.city) == Self::city_key(city)
    }
}
