//! Domain model for owned contact records.
//!
//! # Responsibility
//! - Define the value structs exchanged with repositories.
//! - Keep field rules (`ContactIn::validate`) next to the shapes they guard.
//!
//! # Invariants
//! - Every `Contact` carries exactly one owning `UserId`.
//! - Records are hard-deleted; there is no tombstone state.

pub mod contact;
pub mod user;
