//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `contacts_core` linkage and open the configured store.
//! - Keep output deterministic for quick local sanity checks.

use contacts_core::db::migrations::{current_user_version, latest_version};
use contacts_core::Settings;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("contacts_core ping={}", contacts_core::ping());
    println!("contacts_core version={}", contacts_core::core_version());

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("settings error: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = settings.init_logging() {
        eprintln!("logging error: {err}");
        return ExitCode::FAILURE;
    }

    match settings.open_db().and_then(|conn| current_user_version(&conn)) {
        Ok(version) => {
            log::info!("event=cli_status module=cli status=ok schema_version={version}");
            println!("schema version={version} latest={}", latest_version());
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("event=cli_status module=cli status=error error={err}");
            eprintln!("database error: {err}");
            ExitCode::FAILURE
        }
    }
}
