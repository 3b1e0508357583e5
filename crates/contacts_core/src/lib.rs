//! Core data access for the contacts backend.
//! Every contact operation is scoped to the requesting user.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{Settings, SettingsError};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::contact::{Contact, ContactId, ContactIn, ContactOut, ContactValidationError};
pub use model::user::{NewUser, UserId, UserOut};
pub use repo::birthday::BirthdayWindow;
pub use repo::contact_repo::{ContactRepository, RepoError, RepoResult, SqliteContactRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use service::contact_service::ContactService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
