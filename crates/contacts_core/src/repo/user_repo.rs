//! Owning-user repository over the `users` table.
//!
//! # Responsibility
//! - Register users so `contacts.user_id` can reference a real row.
//! - Resolve caller identities by id or email.
//!
//! # Invariants
//! - `username` and `email` are unique; duplicates surface as `RepoError::Db`.

use crate::model::user::{NewUser, UserId, UserOut};
use crate::repo::contact_repo::{RepoError, RepoResult};
use crate::repo::schema::ensure_table;
use rusqlite::{params, Connection, OptionalExtension, Row};

const USER_SELECT_SQL: &str = "SELECT id, username, email FROM users";

const USER_COLUMNS: &[&str] = &["id", "username", "email", "created_at"];

/// Repository interface for owning users.
pub trait UserRepository {
    fn create_user(&self, user: &NewUser) -> RepoResult<UserOut>;
    fn get_user(&self, user_id: UserId) -> RepoResult<Option<UserOut>>;
    fn get_user_by_email(&self, email: &str) -> RepoResult<Option<UserOut>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table(conn, "users", USER_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &NewUser) -> RepoResult<UserOut> {
        self.conn.execute(
            "INSERT INTO users (username, email) VALUES (?1, ?2);",
            params![user.username.as_str(), user.email.as_str()],
        )?;
        let id = self.conn.last_insert_rowid();

        self.get_user(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("inserted user {id} could not be read back"))
        })
    }

    fn get_user(&self, user_id: UserId) -> RepoResult<Option<UserOut>> {
        let user = self
            .conn
            .query_row(
                &format!("{USER_SELECT_SQL} WHERE id = ?1;"),
                [user_id],
                parse_user_row,
            )
            .optional()?;
        Ok(user)
    }

    fn get_user_by_email(&self, email: &str) -> RepoResult<Option<UserOut>> {
        let user = self
            .conn
            .query_row(
                &format!("{USER_SELECT_SQL} WHERE email = ?1;"),
                [email],
                parse_user_row,
            )
            .optional()?;
        Ok(user)
    }
}

fn parse_user_row(row: &Row<'_>) -> rusqlite::Result<UserOut> {
    Ok(UserOut {
        id: row.get("id")?,
        username: row.get("username")?,
        email: row.get("email")?,
    })
}
