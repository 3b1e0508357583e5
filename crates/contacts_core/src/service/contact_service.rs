//! Contact use-case service.
//!
//! # Responsibility
//! - Provide the caller-facing entry points for contact operations.
//! - Delegate persistence to a `ContactRepository` implementation.
//!
//! # Invariants
//! - Results and errors are passed through unchanged.
//! - Log lines carry ids and counts only, never names, emails or phones.

use crate::model::contact::{Contact, ContactId, ContactIn};
use crate::model::user::UserOut;
use crate::repo::contact_repo::{ContactRepository, RepoResult};
use log::{debug, warn};

/// Use-case service wrapper for owner-scoped contact operations.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_contacts(&self, skip: u32, limit: u32, user: &UserOut) -> RepoResult<Vec<Contact>> {
        let result = self.repo.list_contacts(skip, limit, user);
        log_many("contact_list", user, &result);
        result
    }

    pub fn get_contact(&self, contact_id: ContactId, user: &UserOut) -> RepoResult<Option<Contact>> {
        let result = self.repo.get_contact(contact_id, user);
        log_optional("contact_get", contact_id, user, &result);
        result
    }

    /// Creates a contact owned by `user`.
    ///
    /// Returns validation errors before any SQL runs.
    pub fn create_contact(&self, fields: &ContactIn, user: &UserOut) -> RepoResult<Contact> {
        let result = self.repo.create_contact(fields, user);
        match &result {
            Ok(contact) => debug!(
                "event=contact_create module=service status=ok user_id={} contact_id={}",
                user.id, contact.id
            ),
            Err(err) => warn!(
                "event=contact_create module=service status=error user_id={} error={}",
                user.id, err
            ),
        }
        result
    }

    /// Replaces every mutable field of an owned contact.
    pub fn update_contact(
        &self,
        contact_id: ContactId,
        fields: &ContactIn,
        user: &UserOut,
    ) -> RepoResult<Option<Contact>> {
        let result = self.repo.update_contact(contact_id, fields, user);
        log_optional("contact_update", contact_id, user, &result);
        result
    }

    pub fn remove_contact(
        &self,
        contact_id: ContactId,
        user: &UserOut,
    ) -> RepoResult<Option<Contact>> {
        let result = self.repo.remove_contact(contact_id, user);
        log_optional("contact_remove", contact_id, user, &result);
        result
    }

    /// Searches owned contacts; the query text itself is not logged.
    pub fn search_contacts(
        &self,
        query: &str,
        skip: u32,
        limit: u32,
        user: &UserOut,
    ) -> RepoResult<Vec<Contact>> {
        let result = self.repo.search_contacts(query, skip, limit, user);
        log_many("contact_search", user, &result);
        result
    }

    pub fn upcoming_birthdays(&self, user: &UserOut) -> RepoResult<Vec<Contact>> {
        let result = self.repo.upcoming_birthdays(user);
        log_many("contact_birthdays", user, &result);
        result
    }
}

fn log_many(event: &str, user: &UserOut, result: &RepoResult<Vec<Contact>>) {
    match result {
        Ok(contacts) => debug!(
            "event={event} module=service status=ok user_id={} count={}",
            user.id,
            contacts.len()
        ),
        Err(err) => warn!(
            "event={event} module=service status=error user_id={} error={}",
            user.id, err
        ),
    }
}

fn log_optional(
    event: &str,
    contact_id: ContactId,
    user: &UserOut,
    result: &RepoResult<Option<Contact>>,
) {
    match result {
        Ok(found) => debug!(
            "event={event} module=service status=ok user_id={} contact_id={} found={}",
            user.id,
            contact_id,
            found.is_some()
        ),
        Err(err) => warn!(
            "event={event} module=service status=error user_id={} contact_id={} error={}",
            user.id, contact_id, err
        ),
    }
}
