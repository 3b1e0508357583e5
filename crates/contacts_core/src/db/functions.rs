//! Scalar SQL functions registered on every contacts connection.

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

/// Registers `casefold(text)`: Unicode lowercase, `NULL` stays `NULL`.
///
/// SQLite's own `lower()` and `LIKE` fold ASCII only, so `Émile` and
/// `émile` would not match without it.
pub(crate) fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "casefold",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value = ctx.get::<Option<String>>(0)?;
            Ok(value.map(|text| text.to_lowercase()))
        },
    )
}
