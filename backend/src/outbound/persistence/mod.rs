//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the donor, hospital and blood request
//! repository ports backed by PostgreSQL via `diesel-async` and a `bb8`
//! connection pool.
//!
//! Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module. Adapters only translate between rows and domain
//! types, mapping every database failure onto the port's error enum.
//!
//! # Example
//!
//! ```ignore
//! use bloodbank::outbound::persistence::{DbPool, DieselDonorRepository, PoolConfig};
//!
//! let config = PoolConfig::new("postgres://localhost/bloodbank");
//! let pool = DbPool::new(config).await?;
//! let donors = DieselDonorRepository::new(pool);
//! ```

mod diesel_blood_request_repository;
mod diesel_donor_repository;
mod diesel_error_mapping;
mod diesel_hospital_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_blood_request_repository::DieselBloodRequestRepository;
pub use diesel_donor_repository::DieselDonorRepository;
pub use diesel_hospital_repository::DieselHospitalRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
