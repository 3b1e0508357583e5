//! Connection readiness checks shared by SQLite repositories.

use crate::db::migrations::{current_user_version, latest_version};
use crate::repo::contact_repo::{RepoError, RepoResult};
use rusqlite::Connection;
use std::collections::HashSet;

/// Rejects connections that were not opened through `crate::db`.
///
/// # Errors
/// - `UninitializedConnection` when `user_version` differs from the latest migration.
/// - `MissingRequiredTable` / `MissingRequiredColumn` when the table shape is off.
pub(crate) fn ensure_table(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let present = stmt
        .query_map([table], |row| row.get::<_, String>(0))?
        .collect::<Result<HashSet<_>, _>>()?;

    if present.is_empty() {
        return Err(RepoError::MissingRequiredTable(table));
    }

    if let Some(&column) = columns.iter().find(|column| !present.contains(**column)) {
        return Err(RepoError::MissingRequiredColumn { table, column });
    }

    Ok(())
}
