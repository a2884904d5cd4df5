//! Test infrastructure for search scope tests.
//!
//! Shared record types, fixture rows and schema setup used by both the
//! SQL-shape tests and the PostgreSQL integration tests.

pub mod fixtures;

pub use fixtures::*;
