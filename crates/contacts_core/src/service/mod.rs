//! Core use-case services.
//!
//! # Responsibility
//! - Wrap repository calls into use-case level APIs.
//! - Emit operation-level diagnostics without contact PII.

pub mod contact_service;
