//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define per-user data access contracts for contacts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Every contact read/write filters by contact id AND owning user id.
//! - Absence (missing or foreign-owned) is `Ok(None)`, never an error.
//! - Writes enforce `ContactIn::validate()` before persistence.

pub mod birthday;
pub mod contact_repo;
mod schema;
pub mod user_repo;
