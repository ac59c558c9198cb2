//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **security**: Argon2 password hashing and HS256 bearer tokens
//! - **notify**: hospital notifications for new blood requests
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod notify;
pub mod persistence;
pub mod security;
