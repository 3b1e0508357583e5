//! Contact domain model.
//!
//! # Responsibility
//! - Define the persisted `Contact` record and its `ContactIn` input shape.
//! - Validate caller-supplied fields before they reach the store.
//!
//! # Invariants
//! - `id` and `user_id` are assigned once and never replaced by updates.
//! - `ContactIn` always carries the full mutable field set.

use crate::model::user::UserId;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Row id of a `contacts` record.
pub type ContactId = i64;

pub const NAME_MAX_CHARS: usize = 50;
pub const EMAIL_MAX_CHARS: usize = 100;
pub const PHONE_MAX_CHARS: usize = 20;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Persisted contact owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    /// Serialized as ISO `YYYY-MM-DD`.
    pub date_of_birth: NaiveDate,
    pub user_id: UserId,
}

/// Outbound shape of a contact. Identical to the persisted record.
pub type ContactOut = Contact;

/// The five replaceable contact fields, as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactIn {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: NaiveDate,
}

/// Field-rule violation found by [`ContactIn::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    /// Field is empty or whitespace only.
    EmptyField(&'static str),
    FieldTooLong {
        field: &'static str,
        max_chars: usize,
        actual_chars: usize,
    },
    /// Not shaped like `local@domain.tld`. The value is kept out of the error
    /// so it never reaches log lines.
    InvalidEmail,
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "contact field `{field}` cannot be empty"),
            Self::FieldTooLong {
                field,
                max_chars,
                actual_chars,
            } => write!(
                f,
                "contact field `{field}` has {actual_chars} characters; at most {max_chars} allowed"
            ),
            Self::InvalidEmail => write!(f, "contact field `email` is not a valid address"),
        }
    }
}

impl Error for ContactValidationError {}

impl ContactIn {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
        date_of_birth: NaiveDate,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone_number: phone_number.into(),
            date_of_birth,
        }
    }

    /// Checks field rules required before any write.
    ///
    /// # Errors
    /// - `EmptyField` for blank names, email or phone.
    /// - `FieldTooLong` when a field exceeds its column budget.
    /// - `InvalidEmail` when `email` is not `local@domain.tld` shaped.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        check_text("first_name", &self.first_name, NAME_MAX_CHARS)?;
        check_text("last_name", &self.last_name, NAME_MAX_CHARS)?;
        check_text("email", &self.email, EMAIL_MAX_CHARS)?;
        check_text("phone_number", &self.phone_number, PHONE_MAX_CHARS)?;

        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(ContactValidationError::InvalidEmail);
        }

        Ok(())
    }

    /// Binds these fields to a stored identity and owner.
    pub fn into_contact(self, id: ContactId, user_id: UserId) -> Contact {
        Contact {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            date_of_birth: self.date_of_birth,
            user_id,
        }
    }
}

fn check_text(
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<(), ContactValidationError> {
    if value.trim().is_empty() {
        return Err(ContactValidationError::EmptyField(field));
    }
    let actual_chars = value.chars().count();
    if actual_chars > max_chars {
        return Err(ContactValidationError::FieldTooLong {
            field,
            max_chars,
            actual_chars,
        });
    }
    Ok(())
}
