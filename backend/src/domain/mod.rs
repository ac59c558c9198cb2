//! Domain primitives, aggregates, ports and services.
//!
//! Purpose: define strongly typed entities for donors, hospitals and blood
//! requests, plus the services that implement the driving ports. Nothing in
//! this module knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Donor, Hospital, BloodRequest: aggregates with validated fields.
//! - Inventory / InventoryPatch: per-group unit counters and merge updates.
//! - AccountService, DonorService, HospitalService, BloodRequestService:
//!   implementations of the driving ports in [`ports`].

pub mod auth;
pub mod blood_group;
pub mod blood_request;
pub mod contact;
pub mod donor;
pub mod error;
pub mod hospital;
pub mod ids;
pub mod inventory;
pub mod ports;
pub mod review;
pub mod trace_id;

mod account_service;
mod blood_request_service;
mod donor_service;
mod hospital_service;
mod repository_errors;

pub use self::account_service::AccountService;
pub(crate) use self::account_service::UNKNOWN_ACCOUNT_HASH;
pub use self::auth::{
    AccountCredentials, AccountKind, DonorRegistration, DonorRegistrationFields,
    HospitalRegistration, HospitalRegistrationFields, LoginCredentials, LoginValidationError,
    PASSWORD_MIN_LEN, PasswordHash, Principal, RegistrationValidationError,
};
pub use self::blood_group::{BloodGroup, UnknownBloodGroup};
pub use self::blood_request::{
    BloodRequest, BloodRequestDraft, BloodRequestValidationError, CANCELLED_BY_USER_NOTE,
    DonorRequestView, HospitalRequestView, NewBloodRequest, PartySummary, Priority,
    RequestStatus, SUBMITTED_NOTE, TimelineEntry,
};
pub use self::blood_request_service::BloodRequestService;
pub use self::contact::{ContactValidationError, EmailAddress, Location, PhoneNumber};
pub use self::donor::{
    DONATION_INTERVAL_MONTHS, Donation, Donor, DonorDraft, DonorProfile, calendar_months_between,
};
pub use self::donor_service::DonorService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::hospital::{
    EmergencyContact, Hospital, HospitalDraft, HospitalStatus, HospitalValidationError,
    OperatingHours,
};
pub use self::hospital_service::HospitalService;
pub use self::ids::{BloodRequestId, DonorId, HospitalId, IdValidationError};
pub use self::inventory::{Inventory, InventoryPatch, InventoryPatchError, MAX_UNITS};
pub use self::review::{RATING_MAX, RATING_MIN, Rating, Review, ReviewValidationError};
pub use self::trace_id::TraceId;
