//! SQLite backing for durable client storage.
//!
//! [`Database`] owns the connection and brings the schema up to date on
//! open; [`migrations`] holds the versioned schema steps.

pub mod connection;
pub mod migrations;

pub use connection::Database;
