//! Versioned schema for the contacts store.
//!
//! | version | name | effect |
//! |---|---|---|
//! | 1 | `users_and_contacts` | `users` and owner-referencing `contacts` tables |
//! | 2 | `contacts_owner_index` | index on `contacts(user_id)` for owner-scoped scans |
//!
//! # Invariants
//! - Versions are strictly increasing and never renumbered.
//! - All pending steps run in one transaction; `user_version` moves with them.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "users_and_contacts",
        sql: include_str!("0001_init.sql"),
    },
    Migration {
        version: 2,
        name: "contacts_owner_index",
        sql: include_str!("0002_contacts_owner_index.sql"),
    },
];

/// Schema version a fully migrated contacts store reports.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings `conn` from its recorded version up to [`latest_version`].
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the store is ahead of this build.
/// - `Migration` naming the first step SQLite rejected; nothing is committed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version = current_user_version(conn)?;
    let latest = latest_version();
    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }

    let pending: Vec<&Migration> = MIGRATIONS
        .iter()
        .filter(|migration| migration.version > from_version)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in &pending {
        run_step(&tx, migration).map_err(|source| DbError::Migration {
            version: migration.version,
            name: migration.name,
            source,
        })?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={from_version} to_version={latest} steps={}",
        pending.len()
    );
    Ok(())
}

fn run_step(conn: &Connection, migration: &Migration) -> rusqlite::Result<()> {
    conn.execute_batch(migration.sql)?;
    conn.pragma_update(None, "user_version", migration.version)
}

/// Schema version recorded in `PRAGMA user_version`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
