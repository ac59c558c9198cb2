//! Individual blood donors and donation eligibility.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use crate::domain::{BloodGroup, DonorId, EmailAddress, HospitalId, Location, PhoneNumber};

/// Months that must separate two donations.
pub const DONATION_INTERVAL_MONTHS: i64 = 3;

/// One recorded donation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    /// When the donation happened.
    pub date: DateTime<Utc>,
    /// Hospital that collected it, if recorded.
    pub hospital_id: Option<HospitalId>,
    /// Units donated.
    pub units: u32,
}

/// Fields of a donor record. The password hash is held by the repository only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonorDraft {
    /// Donor identifier.
    pub id: DonorId,
    /// Full name.
    pub name: String,
    /// Login email, unique across donors.
    pub email: EmailAddress,
    /// Contact phone.
    pub phone: PhoneNumber,
    /// Donor blood group.
    pub blood_group: BloodGroup,
    /// City and state.
    pub location: Location,
    /// Most recent donation, if any.
    pub last_donation: Option<DateTime<Utc>>,
    /// Recorded donations.
    pub donation_history: Vec<Donation>,
    /// Signup time.
    pub created_at: DateTime<Utc>,
}

/// Registered individual donor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    id: DonorId,
    name: String,
    email: EmailAddress,
    phone: PhoneNumber,
    blood_group: BloodGroup,
    location: Location,
    last_donation: Option<DateTime<Utc>>,
    donation_history: Vec<Donation>,
    created_at: DateTime<Utc>,
}

impl From<DonorDraft> for Donor {
    fn from(draft: DonorDraft) -> Self {
        let DonorDraft {
            id,
            name,
            email,
            phone,
            blood_group,
            location,
            last_donation,
            donation_history,
            created_at,
        } = draft;
        Self {
            id,
            name,
            email,
            phone,
            blood_group,
            location,
            last_donation,
            donation_history,
            created_at,
        }
    }
}

impl Donor {
    /// Donor identifier.
    #[must_use]
    pub fn id(&self) -> DonorId {
        self.id
    }

    /// Full name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Login email.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Contact phone.
    #[must_use]
    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    /// Donor blood group.
    #[must_use]
    pub fn blood_group(&self) -> BloodGroup {
        self.blood_group
    }

    /// City and state.
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Most recent donation, if any.
    #[must_use]
    pub fn last_donation(&self) -> Option<DateTime<Utc>> {
        self.last_donation
    }

    /// Recorded donations.
    #[must_use]
    pub fn donation_history(&self) -> &[Donation] {
        &self.donation_history
    }

    /// Signup time.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the donor may donate at `now`.
    ///
    /// A donor who has never donated is eligible. Otherwise at least
    /// [`DONATION_INTERVAL_MONTHS`] calendar months must separate the last
    /// donation from `now`; the day of the month is ignored.
    #[must_use]
    pub fn is_eligible_to_donate(&self, now: DateTime<Utc>) -> bool {
        self.last_donation
            .is_none_or(|last| calendar_months_between(last, now) >= DONATION_INTERVAL_MONTHS)
    }
}

/// Whole calendar months from `earlier` to `later`, ignoring the day.
///
/// # Examples
/// ```
/// use bloodbank::domain::calendar_months_between;
/// use chrono::{TimeZone, Utc};
///
/// let jan_31 = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
/// let apr_1 = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
/// assert_eq!(calendar_months_between(jan_31, apr_1), 3);
/// ```
#[must_use]
pub fn calendar_months_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    let years = i64::from(later.year()) - i64::from(earlier.year());
    let months = i64::from(later.month()) - i64::from(earlier.month());
    years * 12 + months
}

/// Donor projection returned by profile reads, with derived eligibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorProfile {
    /// Whether enough time has passed since the last donation.
    #[serde(flatten)]
    pub donor: Donor,
    /// Whether enough time has passed since the last donation.
    pub eligible_to_donate: bool,
}

impl DonorProfile {
    /// Project `donor` with eligibility evaluated at `now`.
    #[must_use]
    pub fn at(donor: Donor, now: DateTime<Utc>) -> Self {
        let eligible_to_donate = donor.is_eligible_to_donate(now);
        Self {
            donor,
            eligible_to_donate,
        }
    }
}
