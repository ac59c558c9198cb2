//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on domain
//! ports, so they stay testable without a database.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommand, BloodRequestCommand, BloodRequestQuery, DonorQuery, HospitalCommand,
    HospitalQuery, TokenService,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```no_run
/// # use std::sync::Arc;
/// # use bloodbank::domain::ports::*;
/// # use bloodbank::inbound::http::state::HttpState;
/// # fn build(
/// #     accounts: Arc<dyn AccountCommand>,
/// #     donors: Arc<dyn DonorQuery>,
/// #     hospitals: Arc<dyn HospitalQuery>,
/// #     hospital_commands: Arc<dyn HospitalCommand>,
/// #     requests: Arc<dyn BloodRequestCommand>,
/// #     request_queries: Arc<dyn BloodRequestQuery>,
/// #     tokens: Arc<dyn TokenService>,
/// # ) -> HttpState {
/// HttpState {
///     accounts,
///     donors,
///     hospitals,
///     hospital_commands,
///     requests,
///     request_queries,
///     tokens,
/// }
/// # }
/// ```
#[derive(Clone)]
pub struct HttpState {
    /// Signup and login.
    pub accounts: Arc<dyn AccountCommand>,
    /// Donor profile and request history.
    pub donors: Arc<dyn DonorQuery>,
    /// Hospital directory and profiles.
    pub hospitals: Arc<dyn HospitalQuery>,
    /// Inventory updates and reviews.
    pub hospital_commands: Arc<dyn HospitalCommand>,
    /// Request submission, cancellation and decisions.
    pub requests: Arc<dyn BloodRequestCommand>,
    /// Hospital request listings.
    pub request_queries: Arc<dyn BloodRequestQuery>,
    /// Verifies bearer tokens for [`super::auth::AuthContext`].
    pub tokens: Arc<dyn TokenService>,
}
