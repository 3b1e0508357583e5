//! Contact repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide owner-scoped CRUD, search and birthday queries over `contacts`.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Every statement binds `user_id`; a contact id alone never matches.
//! - Not-found and not-owned collapse into the same `None`.
//! - Read paths reject undecodable rows instead of masking them.
//! - Store failures propagate unchanged; nothing is retried.

use crate::db::{register_functions, DbError};
use crate::model::contact::{Contact, ContactId, ContactIn, ContactValidationError};
use crate::model::user::{UserId, UserOut};
use crate::repo::birthday::BirthdayWindow;
use crate::repo::schema::ensure_table;
use chrono::NaiveDate;
use mockable::{Clock, DefaultClock};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    email,
    phone_number,
    date_of_birth,
    user_id
FROM contacts";

const CONTACT_COLUMNS: &[&str] = &[
    "id",
    "first_name",
    "last_name",
    "email",
    "phone_number",
    "date_of_birth",
    "user_id",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for contact and user persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(ContactValidationError),
    Db(DbError),
    InvalidData(String),
    /// Connection has not been migrated to the schema this build expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// The clock reported a date whose birthday window cannot be computed.
    DateOutOfRange(NaiveDate),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it through db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
            Self::DateOutOfRange(today) => {
                write!(f, "cannot compute birthday window from date {today}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. }
            | Self::DateOutOfRange(_) => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Owner-scoped data access contract for contacts.
///
/// Every method takes the requesting identity and only ever sees rows whose
/// `user_id` equals `user.id`.
pub trait ContactRepository {
    /// Lists owned contacts by ascending id, skipping `skip`, at most `limit`.
    fn list_contacts(&self, skip: u32, limit: u32, user: &UserOut) -> RepoResult<Vec<Contact>>;
    fn get_contact(&self, contact_id: ContactId, user: &UserOut) -> RepoResult<Option<Contact>>;
    /// Persists a new contact owned by `user` and returns it with its id.
    fn create_contact(&self, fields: &ContactIn, user: &UserOut) -> RepoResult<Contact>;
    /// Replaces all five mutable fields; `None` and no write when not owned.
    fn update_contact(
        &self,
        contact_id: ContactId,
        fields: &ContactIn,
        user: &UserOut,
    ) -> RepoResult<Option<Contact>>;
    /// Deletes and returns the pre-deletion snapshot.
    fn remove_contact(&self, contact_id: ContactId, user: &UserOut)
        -> RepoResult<Option<Contact>>;
    /// Unicode case-insensitive substring search over first name, last name
    /// and email. The query is matched literally; `%` and `_` are not wildcards.
    ///
    /// An empty `query` yields an empty list.
    fn search_contacts(
        &self,
        query: &str,
        skip: u32,
        limit: u32,
        user: &UserOut,
    ) -> RepoResult<Vec<Contact>>;
    /// Contacts matching [`BirthdayWindow::starting`] for the current date.
    fn upcoming_birthdays(&self, user: &UserOut) -> RepoResult<Vec<Contact>>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
    clock: Arc<dyn Clock>,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Wraps a migrated connection, reading "today" from the system clock.
    ///
    /// # Errors
    /// - Returns schema readiness errors when `conn` was not opened via `db`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Self::try_with_clock(conn, Arc::new(DefaultClock))
    }

    /// Same as [`Self::try_new`] with an injected clock.
    ///
    /// `casefold` is (re)registered here so search also works on connections
    /// migrated outside `db::open_db`.
    pub fn try_with_clock(conn: &'conn Connection, clock: Arc<dyn Clock>) -> RepoResult<Self> {
        ensure_table(conn, "contacts", CONTACT_COLUMNS)?;
        register_functions(conn)?;
        Ok(Self { conn, clock })
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn list_contacts(&self, skip: u32, limit: u32, user: &UserOut) -> RepoResult<Vec<Contact>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CONTACT_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY id ASC
             LIMIT ?2 OFFSET ?3;"
        ))?;
        let mut rows = stmt.query(params![user.id, i64::from(limit), i64::from(skip)])?;
        collect_contacts(&mut rows)
    }

    fn get_contact(&self, contact_id: ContactId, user: &UserOut) -> RepoResult<Option<Contact>> {
        fetch_owned(self.conn, contact_id, user.id)
    }

    fn create_contact(&self, fields: &ContactIn, user: &UserOut) -> RepoResult<Contact> {
        fields.validate()?;

        self.conn.execute(
            "INSERT INTO contacts (
                first_name,
                last_name,
                email,
                phone_number,
                date_of_birth,
                user_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                fields.first_name.as_str(),
                fields.last_name.as_str(),
                fields.email.as_str(),
                fields.phone_number.as_str(),
                fields.date_of_birth,
                user.id,
            ],
        )?;
        let id = self.conn.last_insert_rowid();

        fetch_owned(self.conn, id, user.id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("inserted contact {id} could not be read back"))
        })
    }

    fn update_contact(
        &self,
        contact_id: ContactId,
        fields: &ContactIn,
        user: &UserOut,
    ) -> RepoResult<Option<Contact>> {
        fields.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        let Some(existing) = fetch_owned(&tx, contact_id, user.id)? else {
            return Ok(None);
        };

        tx.execute(
            "UPDATE contacts
             SET
                first_name = ?1,
                last_name = ?2,
                email = ?3,
                phone_number = ?4,
                date_of_birth = ?5
             WHERE id = ?6 AND user_id = ?7;",
            params![
                fields.first_name.as_str(),
                fields.last_name.as_str(),
                fields.email.as_str(),
                fields.phone_number.as_str(),
                fields.date_of_birth,
                existing.id,
                existing.user_id,
            ],
        )?;
        tx.commit()?;

        Ok(Some(fields.clone().into_contact(existing.id, existing.user_id)))
    }

    fn remove_contact(
        &self,
        contact_id: ContactId,
        user: &UserOut,
    ) -> RepoResult<Option<Contact>> {
        let tx = self.conn.unchecked_transaction()?;
        let Some(existing) = fetch_owned(&tx, contact_id, user.id)? else {
            return Ok(None);
        };

        tx.execute(
            "DELETE FROM contacts WHERE id = ?1 AND user_id = ?2;",
            params![existing.id, existing.user_id],
        )?;
        tx.commit()?;

        Ok(Some(existing))
    }

    fn search_contacts(
        &self,
        query: &str,
        skip: u32,
        limit: u32,
        user: &UserOut,
    ) -> RepoResult<Vec<Contact>> {
        // TODO: decide whether an empty query should fall back to list_contacts.
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut stmt = self.conn.prepare(&format!(
            "{CONTACT_SELECT_SQL}
             WHERE user_id = ?1
               AND (
                    instr(casefold(first_name), casefold(?2)) > 0
                    OR instr(casefold(last_name), casefold(?2)) > 0
                    OR instr(casefold(email), casefold(?2)) > 0
               )
             ORDER BY id ASC
             LIMIT ?3 OFFSET ?4;"
        ))?;
        let mut rows = stmt.query(params![user.id, query, i64::from(limit), i64::from(skip)])?;
        collect_contacts(&mut rows)
    }

    fn upcoming_birthdays(&self, user: &UserOut) -> RepoResult<Vec<Contact>> {
        let today = self.clock.local().date_naive();
        let window = BirthdayWindow::starting(today).ok_or(RepoError::DateOutOfRange(today))?;

        let mut stmt = self.conn.prepare(&format!(
            "{CONTACT_SELECT_SQL}
             WHERE user_id = ?1
               AND CAST(strftime('%m', date_of_birth) AS INTEGER) = ?2
               AND CAST(strftime('%d', date_of_birth) AS INTEGER) >= ?3
               AND CAST(strftime('%d', date_of_birth) AS INTEGER) <= ?4
             ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query(params![
            user.id,
            i64::from(window.month),
            i64::from(window.start_day),
            i64::from(window.end_day)
        ])?;
        collect_contacts(&mut rows)
    }
}

fn fetch_owned(
    conn: &Connection,
    contact_id: ContactId,
    user_id: UserId,
) -> RepoResult<Option<Contact>> {
    let mut stmt = conn.prepare(&format!(
        "{CONTACT_SELECT_SQL}
         WHERE id = ?1 AND user_id = ?2;"
    ))?;
    let row = stmt
        .query_row(params![contact_id, user_id], read_raw_row)
        .optional()?;

    row.map(RawContactRow::into_contact).transpose()
}

fn collect_contacts(rows: &mut rusqlite::Rows<'_>) -> RepoResult<Vec<Contact>> {
    let mut contacts = Vec::new();
    while let Some(row) = rows.next()? {
        contacts.push(read_raw_row(row)?.into_contact()?);
    }
    Ok(contacts)
}

/// Column values as stored, before date decoding.
struct RawContactRow {
    id: ContactId,
    first_name: String,
    last_name: String,
    email: String,
    phone_number: String,
    date_of_birth: String,
    user_id: UserId,
}

fn read_raw_row(row: &Row<'_>) -> rusqlite::Result<RawContactRow> {
    Ok(RawContactRow {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        phone_number: row.get("phone_number")?,
        date_of_birth: row.get("date_of_birth")?,
        user_id: row.get("user_id")?,
    })
}

impl RawContactRow {
    fn into_contact(self) -> RepoResult<Contact> {
        let date_of_birth =
            NaiveDate::parse_from_str(&self.date_of_birth, DATE_FORMAT).map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid date `{}` in contacts.date_of_birth for id {}",
                    self.date_of_birth, self.id
                ))
            })?;

        Ok(Contact {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            date_of_birth,
            user_id: self.user_id,
        })
    }
}
