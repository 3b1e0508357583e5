#![allow(dead_code)]

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use contacts_core::{ContactIn, NewUser, SqliteUserRepository, UserOut, UserRepository};
use mockable::Clock;
use rusqlite::Connection;
use std::sync::Arc;

pub struct FixedClock {
    local_now: DateTime<Local>,
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.local_now
    }

    fn utc(&self) -> DateTime<Utc> {
        self.local_now.with_timezone(&Utc)
    }
}

/// Clock pinned to local noon of the given day.
pub fn clock_on(year: i32, month: u32, day: u32) -> Arc<dyn Clock> {
    let local_now = Local
        .with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .unwrap();
    Arc::new(FixedClock { local_now })
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn create_user(conn: &Connection, username: &str) -> UserOut {
    let repo = SqliteUserRepository::try_new(conn).unwrap();
    repo.create_user(&NewUser::new(username, format!("{username}@example.org")))
        .unwrap()
}

pub fn contact_in(first_name: &str, last_name: &str, email: &str, born: NaiveDate) -> ContactIn {
    ContactIn::new(first_name, last_name, email, "555", born)
}

pub fn born_on(first_name: &str, month: u32, day: u32) -> ContactIn {
    contact_in(
        first_name,
        "Doe",
        &format!("{}@example.org", first_name.to_lowercase()),
        date(1990, month, day),
    )
}
