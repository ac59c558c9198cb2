//! Blood requests submitted by donors to hospitals.
//!
//! A request starts as [`RequestStatus::Pending`]. Hospitals may set any
//! status at any time; donors may only cancel while the request is pending.
//! Every change appends a [`TimelineEntry`]. No status touches inventory.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{BloodGroup, BloodRequestId, DonorId, HospitalId};

/// Note recorded on the first timeline entry.
pub const SUBMITTED_NOTE: &str = "Request submitted";
/// Note recorded when a donor cancels.
pub const CANCELLED_BY_USER_NOTE: &str = "Cancelled by user";

/// Validation errors for blood request fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BloodRequestValidationError {
    /// The patient name was blank.
    EmptyPatientName,
    /// Zero units were requested.
    ZeroUnits,
    /// A priority string named no known priority.
    UnknownPriority { value: String },
    /// A status string named no known status.
    UnknownStatus { value: String },
}

impl fmt::Display for BloodRequestValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPatientName => write!(f, "patient name must not be empty"),
            Self::ZeroUnits => write!(f, "units required must be at least 1"),
            Self::UnknownPriority { value } => write!(
                f,
                "priority must be NORMAL, URGENT or EMERGENCY (got '{value}')"
            ),
            Self::UnknownStatus { value } => write!(
                f,
                "status must be PENDING, APPROVED, REJECTED, FULFILLED or CANCELLED (got '{value}')"
            ),
        }
    }
}

impl std::error::Error for BloodRequestValidationError {}

/// Clinical urgency of a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Needed immediately.
    #[default]
    Normal,
    /// Needed soon.
    Urgent,
    /// Needed immediately.
    Emergency,
}

impl Priority {
    /// Wire name of the priority.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Urgent => "URGENT",
            Self::Emergency => "EMERGENCY",
        }
    }
}

impl FromStr for Priority {
    type Err = BloodRequestValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NORMAL" => Ok(Self::Normal),
            "URGENT" => Ok(Self::Urgent),
            "EMERGENCY" => Ok(Self::Emergency),
            other => Err(BloodRequestValidationError::UnknownPriority {
                value: other.to_owned(),
            }),
        }
    }
}

/// Lifecycle status of a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// Withdrawn by the donor.
    #[default]
    Pending,
    /// Accepted by the hospital.
    Approved,
    /// Declined by the hospital.
    Rejected,
    /// Units handed over.
    Fulfilled,
    /// Withdrawn by the donor.
    Cancelled,
}

impl RequestStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Fulfilled => "FULFILLED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = BloodRequestValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            "FULFILLED" => Ok(Self::Fulfilled),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(BloodRequestValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// One entry of a request's status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    /// Status entered.
    pub status: RequestStatus,
    /// When the status was entered.
    pub date: DateTime<Utc>,
    /// Note recorded with the change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Validated donor input for a new request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBloodRequest {
    patient_name: String,
    blood_group: BloodGroup,
    units_required: u32,
    priority: Priority,
}

impl NewBloodRequest {
    /// Validate the donor-supplied fields.
    ///
    /// # Examples
    /// ```
    /// use bloodbank::domain::{BloodGroup, NewBloodRequest, Priority};
    ///
    /// let request = NewBloodRequest::new("Meera", BloodGroup::BPositive, 2, None).unwrap();
    /// assert_eq!(request.priority(), Priority::Normal);
    /// ```
    pub fn new(
        patient_name: impl Into<String>,
        blood_group: BloodGroup,
        units_required: u32,
        priority: Option<Priority>,
    ) -> Result<Self, BloodRequestValidationError> {
        let patient_name = patient_name.into().trim().to_owned();
        if patient_name.is_empty() {
            return Err(BloodRequestValidationError::EmptyPatientName);
        }
        if units_required == 0 {
            return Err(BloodRequestValidationError::ZeroUnits);
        }
        Ok(Self {
            patient_name,
            blood_group,
            units_required,
            priority: priority.unwrap_or_default(),
        })
    }

    /// Name of the patient.
    #[must_use]
    pub fn patient_name(&self) -> &str {
        &self.patient_name
    }

    /// Requested blood group.
    #[must_use]
    pub fn blood_group(&self) -> BloodGroup {
        self.blood_group
    }

    /// Units requested.
    #[must_use]
    pub fn units_required(&self) -> u32 {
        self.units_required
    }

    /// Urgency, defaulting to normal.
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
    }
}

/// Fields of a stored request, used by adapters to rehydrate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloodRequestDraft {
    /// Request identifier.
    pub id: BloodRequestId,
    /// Name of the patient.
    pub patient_name: String,
    /// Requested blood group.
    pub blood_group: BloodGroup,
    /// Units requested.
    pub units_required: u32,
    /// Urgency.
    pub priority: Priority,
    /// Current status.
    pub status: RequestStatus,
    /// Requesting donor.
    pub donor_id: DonorId,
    /// Receiving hospital.
    pub hospital_id: HospitalId,
    /// Submission time.
    pub request_date: DateTime<Utc>,
    /// Time of the latest hospital decision.
    pub response_date: Option<DateTime<Utc>>,
    /// Note from the latest status change.
    pub notes: Option<String>,
    /// Status history, oldest first.
    pub timeline: Vec<TimelineEntry>,
}

/// A donor's request to a hospital for units of one blood group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodRequest {
    id: BloodRequestId,
    patient_name: String,
    blood_group: BloodGroup,
    units_required: u32,
    priority: Priority,
    status: RequestStatus,
    donor_id: DonorId,
    hospital_id: HospitalId,
    request_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    timeline: Vec<TimelineEntry>,
}

impl From<BloodRequestDraft> for BloodRequest {
    fn from(draft: BloodRequestDraft) -> Self {
        let BloodRequestDraft {
            id,
            patient_name,
            blood_group,
            units_required,
            priority,
            status,
            donor_id,
            hospital_id,
            request_date,
            response_date,
            notes,
            timeline,
        } = draft;
        Self {
            id,
            patient_name,
            blood_group,
            units_required,
            priority,
            status,
            donor_id,
            hospital_id,
            request_date,
            response_date,
            notes,
            timeline,
        }
    }
}

impl BloodRequest {
    /// Create a pending request with its first timeline entry.
    #[must_use]
    pub fn submit(
        request: NewBloodRequest,
        donor_id: DonorId,
        hospital_id: HospitalId,
        at: DateTime<Utc>,
    ) -> Self {
        let NewBloodRequest {
            patient_name,
            blood_group,
            units_required,
            priority,
        } = request;
        Self {
            id: BloodRequestId::random(),
            patient_name,
            blood_group,
            units_required,
            priority,
            status: RequestStatus::Pending,
            donor_id,
            hospital_id,
            request_date: at,
            response_date: None,
            notes: None,
            timeline: vec![TimelineEntry {
                status: RequestStatus::Pending,
                date: at,
                notes: Some(SUBMITTED_NOTE.to_owned()),
            }],
        }
    }

    /// Request identifier.
    #[must_use]
    pub fn id(&self) -> BloodRequestId {
        self.id
    }

    /// Name of the patient.
    #[must_use]
    pub fn patient_name(&self) -> &str {
        &self.patient_name
    }

    /// Requested blood group.
    #[must_use]
    pub fn blood_group(&self) -> BloodGroup {
        self.blood_group
    }

    /// Units requested.
    #[must_use]
    pub fn units_required(&self) -> u32 {
        self.units_required
    }

    /// Urgency.
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Requesting donor.
    #[must_use]
    pub fn donor_id(&self) -> DonorId {
        self.donor_id
    }

    /// Receiving hospital.
    #[must_use]
    pub fn hospital_id(&self) -> HospitalId {
        self.hospital_id
    }

    /// Submission time.
    #[must_use]
    pub fn request_date(&self) -> DateTime<Utc> {
        self.request_date
    }

    /// Time of the latest hospital decision, if any.
    #[must_use]
    pub fn response_date(&self) -> Option<DateTime<Utc>> {
        self.response_date
    }

    /// Note from the latest status change.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Status history, oldest first.
    #[must_use]
    pub fn timeline(&self) -> &[TimelineEntry] {
        &self.timeline
    }

    /// Set `status` and append a timeline entry carrying `notes`.
    pub fn record_status(&mut self, status: RequestStatus, notes: Option<String>, at: DateTime<Utc>) {
        self.status = status;
        self.timeline.push(TimelineEntry {
            status,
            date: at,
            notes,
        });
    }

    /// Hospital decision: any status may follow any other.
    ///
    /// Sets the response date and the request notes as well as the timeline.
    pub fn respond(&mut self, status: RequestStatus, notes: Option<String>, at: DateTime<Utc>) {
        self.notes.clone_from(&notes);
        self.response_date = Some(at);
        self.record_status(status, notes, at);
    }

    /// Whether the donor may still cancel.
    #[must_use]
    pub fn is_cancellable(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Donor cancellation.
    pub fn cancel(&mut self, at: DateTime<Utc>) {
        self.record_status(
            RequestStatus::Cancelled,
            Some(CANCELLED_BY_USER_NOTE.to_owned()),
            at,
        );
    }
}

/// Name and contact details of the other party, joined onto request listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartySummary {
    /// Account identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
}

/// A request as seen by its donor, with the hospital's contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorRequestView {
    /// The receiving hospital.
    #[serde(flatten)]
    pub request: BloodRequest,
    /// The receiving hospital.
    pub hospital: PartySummary,
}

/// A request as seen by its hospital, with the donor's contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalRequestView {
    /// The requesting donor.
    #[serde(flatten)]
    pub request: BloodRequest,
    /// The requesting donor.
    pub donor: PartySummary,
}
