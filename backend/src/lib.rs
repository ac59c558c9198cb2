//! Blood donation coordination backend.
//!
//! Layers follow a hexagonal split: [`domain`] holds entities, ports and
//! services; [`inbound`] adapts HTTP onto driving ports; [`outbound`]
//! implements driven ports with Diesel, Argon2 and JWT.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
