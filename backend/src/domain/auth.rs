//! Authentication primitives: account kinds, credentials, registrations and
//! the authenticated principal.
//!
//! Inbound adapters convert raw payloads into these validated types before
//! calling a service, so services never see unchecked input.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::{
    BloodGroup, ContactValidationError, DonorId, EmailAddress, EmergencyContact,
    HospitalId, HospitalValidationError, Location, OperatingHours, PhoneNumber, UnknownBloodGroup,
};

/// Minimum accepted password length in characters.
pub const PASSWORD_MIN_LEN: usize = 6;

/// Which kind of account a principal or login refers to.
///
/// Donors travel as `user` on the wire; `donor` is accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// A blood donor account.
    #[serde(rename = "user", alias = "donor")]
    Donor,
    /// A hospital account.
    Hospital,
}

impl AccountKind {
    /// Wire name of the kind, identical to its serialised form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Donor => "user",
            Self::Hospital => "hospital",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed, lower-cased and non-empty. It is not checked for
///   shape so that a malformed address fails as unknown credentials.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use bloodbank::domain::{AccountKind, LoginCredentials};
///
/// let creds = LoginCredentials::try_from_parts(" Ada@Example.org", "secret", AccountKind::Donor)
///     .unwrap();
/// assert_eq!(creds.email(), "ada@example.org");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
    kind: AccountKind,
}

impl LoginCredentials {
    /// Normalise the email and check both fields are present.
    pub fn try_from_parts(
        email: &str,
        password: &str,
        kind: AccountKind,
    ) -> Result<Self, LoginValidationError> {
        let normalised = email.trim().to_lowercase();
        if normalised.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalised,
            password: Zeroizing::new(password.to_owned()),
            kind,
        })
    }

    /// Trimmed, lower-cased email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Password exactly as supplied.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Account kind the login targets.
    #[must_use]
    pub fn kind(&self) -> AccountKind {
        self.kind
    }
}

/// Encoded password hash as stored by the repositories.
///
/// `Debug` never prints the hash.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Stored login material for one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountCredentials {
    /// Account identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: EmailAddress,
    /// Stored password hash.
    pub password_hash: PasswordHash,
}

/// The authenticated caller, decoded from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    id: Uuid,
    kind: AccountKind,
    name: String,
    email: String,
}

impl Principal {
    /// Principal of either kind.
    pub fn new(id: Uuid, kind: AccountKind, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Principal for a donor account.
    pub fn donor(id: DonorId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::new(*id.as_uuid(), AccountKind::Donor, name, email)
    }

    /// Principal for a hospital account.
    pub fn hospital(id: HospitalId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::new(*id.as_uuid(), AccountKind::Hospital, name, email)
    }

    /// Account identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Account kind.
    #[must_use]
    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Login email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Donor identifier when the principal is a donor.
    pub fn donor_id(&self) -> Option<DonorId> {
        (self.kind == AccountKind::Donor).then(|| DonorId::from_uuid(self.id))
    }

    /// Hospital identifier when the principal is a hospital.
    pub fn hospital_id(&self) -> Option<HospitalId> {
        (self.kind == AccountKind::Hospital).then(|| HospitalId::from_uuid(self.id))
    }
}

/// Signup validation failure tied to the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// A required field was blank.
    MissingField { field: &'static str },
    /// The password was too short.
    PasswordTooShort,
    /// An email, phone or location field was invalid.
    Contact {
        field: &'static str,
        source: ContactValidationError,
    },
    /// The blood group was not recognised.
    BloodGroup(UnknownBloodGroup),
    /// Operating hours were malformed.
    OperatingHours(HospitalValidationError),
}

impl RegistrationValidationError {
    /// JSON path of the field the error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } | Self::Contact { field, .. } => field,
            Self::PasswordTooShort => "password",
            Self::BloodGroup(_) => "bloodGroup",
            Self::OperatingHours(_) => "operatingHours",
        }
    }

    /// Stable machine-readable code for the error details.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::PasswordTooShort => "password_too_short",
            Self::Contact { source, .. } => match source {
                ContactValidationError::EmptyEmail
                | ContactValidationError::EmptyPhone
                | ContactValidationError::EmptyCity
                | ContactValidationError::EmptyState => "missing_field",
                ContactValidationError::InvalidEmail => "invalid_email",
                ContactValidationError::InvalidPhone => "invalid_phone",
            },
            Self::BloodGroup(_) => "invalid_blood_group",
            Self::OperatingHours(_) => "invalid_operating_hours",
        }
    }
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "missing required field: {field}"),
            Self::PasswordTooShort => write!(
                f,
                "password must be at least {PASSWORD_MIN_LEN} characters"
            ),
            Self::Contact { source, .. } => write!(f, "{source}"),
            Self::BloodGroup(err) => write!(f, "{err}"),
            Self::OperatingHours(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

fn required(value: &str, field: &'static str) -> Result<String, RegistrationValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(RegistrationValidationError::MissingField { field })
    } else {
        Ok(trimmed.to_owned())
    }
}

fn password(value: &str) -> Result<Zeroizing<String>, RegistrationValidationError> {
    if value.chars().count() < PASSWORD_MIN_LEN {
        return Err(RegistrationValidationError::PasswordTooShort);
    }
    Ok(Zeroizing::new(value.to_owned()))
}

fn contact_err(field: &'static str) -> impl Fn(ContactValidationError) -> RegistrationValidationError {
    move |source| RegistrationValidationError::Contact { field, source }
}

fn location(city: &str, state: &str) -> Result<Location, RegistrationValidationError> {
    Location::new(city, state).map_err(|source| {
        let field = match source {
            ContactValidationError::EmptyState => "location.state",
            _ => "location.city",
        };
        RegistrationValidationError::Contact { field, source }
    })
}

/// Raw donor signup fields as received from a client.
#[derive(Debug, Clone, Default)]
pub struct DonorRegistrationFields<'a> {
    /// Full name.
    pub name: &'a str,
    /// Login email.
    pub email: &'a str,
    /// Contact phone.
    pub phone: &'a str,
    /// Plain password.
    pub password: &'a str,
    /// Blood group, such as `O+`.
    pub blood_group: &'a str,
    /// Home city.
    pub city: &'a str,
    /// Home state.
    pub state: &'a str,
}

/// Validated donor signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonorRegistration {
    /// Trimmed full name.
    pub name: String,
    /// Normalised email.
    pub email: EmailAddress,
    /// Validated phone.
    pub phone: PhoneNumber,
    /// Plain password, zeroed on drop.
    pub password: Zeroizing<String>,
    /// Parsed blood group.
    pub blood_group: BloodGroup,
    /// City and state.
    pub location: Location,
}

impl DonorRegistration {
    /// Validate raw fields, reporting the first offending field.
    pub fn try_from_fields(
        fields: DonorRegistrationFields<'_>,
    ) -> Result<Self, RegistrationValidationError> {
        let name = required(fields.name, "name")?;
        let email = EmailAddress::new(fields.email).map_err(contact_err("email"))?;
        let phone = PhoneNumber::new(fields.phone).map_err(contact_err("phone"))?;
        let password = password(fields.password)?;
        let blood_group = required(fields.blood_group, "bloodGroup")?
            .to_ascii_uppercase()
            .parse()
            .map_err(RegistrationValidationError::BloodGroup)?;
        let location = location(fields.city, fields.state)?;
        Ok(Self {
            name,
            email,
            phone,
            password,
            blood_group,
            location,
        })
    }
}

/// Raw hospital signup fields as received from a client.
#[derive(Debug, Clone, Default)]
pub struct HospitalRegistrationFields<'a> {
    /// Display name.
    pub hospital_name: &'a str,
    /// Login email.
    pub email: &'a str,
    /// Front desk phone.
    pub phone: &'a str,
    /// Plain password.
    pub password: &'a str,
    /// Official registration number.
    pub registration_number: &'a str,
    /// City.
    pub city: &'a str,
    /// State.
    pub state: &'a str,
    /// Opening time, if given.
    pub open: Option<&'a str>,
    /// Closing time, if given.
    pub close: Option<&'a str>,
    /// Emergency contact name and phone, if given.
    pub emergency_contact: Option<(&'a str, &'a str)>,
}

/// Validated hospital signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HospitalRegistration {
    /// Trimmed display name.
    pub hospital_name: String,
    /// Normalised email.
    pub email: EmailAddress,
    /// Validated phone.
    pub phone: PhoneNumber,
    /// Plain password, zeroed on drop.
    pub password: Zeroizing<String>,
    /// Trimmed registration number.
    pub registration_number: String,
    /// City and state.
    pub location: Location,
    /// Opening hours with defaults applied.
    pub operating_hours: OperatingHours,
    /// Validated emergency contact.
    pub emergency_contact: Option<EmergencyContact>,
}

impl HospitalRegistration {
    /// Validate raw fields, reporting the first offending field.
    pub fn try_from_fields(
        fields: HospitalRegistrationFields<'_>,
    ) -> Result<Self, RegistrationValidationError> {
        let hospital_name = required(fields.hospital_name, "hospitalName")?;
        let email = EmailAddress::new(fields.email).map_err(contact_err("email"))?;
        let phone = PhoneNumber::new(fields.phone).map_err(contact_err("phone"))?;
        let password = password(fields.password)?;
        let registration_number = required(fields.registration_number, "registrationNumber")?;
        let location = location(fields.city, fields.state)?;
        let operating_hours = OperatingHours::from_parts(fields.open, fields.close)
            .map_err(RegistrationValidationError::OperatingHours)?;
        let emergency_contact = fields
            .emergency_contact
            .map(|(name, phone)| {
                Ok::<_, RegistrationValidationError>(EmergencyContact {
                    name: required(name, "emergencyContact.name")?,
                    phone: PhoneNumber::new(phone).map_err(contact_err("emergencyContact.phone"))?,
                })
            })
            .transpose()?;
        Ok(Self {
            hospital_name,
            email,
            phone,
            password,
            registration_number,
            location,
            operating_hours,
            emergency_contact,
        })
    }
}
