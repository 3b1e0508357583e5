//! Owning-user identity.

use serde::{Deserialize, Serialize};

/// Row id of a `users` record.
pub type UserId = i64;

/// Caller identity handed to every contact operation.
///
/// Only `id` takes part in ownership filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOut {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

/// Input for registering an owning user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}
