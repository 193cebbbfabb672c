use chrono::NaiveDate;
use rusqlite::Connection;

use crate::Database;
use crate::StoreError;
use crate::models::{EventRow, RegisteredEventRow, UserRow};

const DATE_FMT: &str = "%Y-%m-%d";

impl Database {
    // -- Users --

    /// Insert a new user and return its id. The username must be unique
    /// (case-sensitive exact match); `password_hash` is the argon2 PHC
    /// string, never plaintext.
    pub fn create_user(&self, username: &str, password_hash: &str) -> Result<i64, StoreError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, password) VALUES (?1, ?2)",
                (username, password_hash),
            )
            .map_err(|e| {
                if StoreError::is_unique_violation(&e) {
                    StoreError::DuplicateUsername
                } else {
                    e.into()
                }
            })?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>, StoreError> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    pub fn get_user_by_id(&self, id: i64) -> Result<Option<UserRow>, StoreError> {
        self.with_conn(|conn| query_user_by_id(conn, id))
    }

    // -- Events --

    /// Unconditional insert; the caller has already validated the name and
    /// date. `created_by` is nullable for events without an attributed
    /// creator.
    pub fn create_event(
        &self,
        name: &str,
        event_date: NaiveDate,
        created_by: Option<i64>,
    ) -> Result<i64, StoreError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO events (name, event_date, created_by) VALUES (?1, ?2, ?3)",
                rusqlite::params![name, event_date.format(DATE_FMT).to_string(), created_by],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_event_by_id(&self, id: i64) -> Result<Option<EventRow>, StoreError> {
        self.with_conn(|conn| query_event_by_id(conn, id))
    }

    /// Full scan. Callers group by date downstream; no ordering contract.
    pub fn list_all_events(&self) -> Result<Vec<EventRow>, StoreError> {
        self.with_conn(query_all_events)
    }

    pub fn list_events_on(&self, date: NaiveDate) -> Result<Vec<EventRow>, StoreError> {
        self.with_conn(|conn| query_events_on(conn, &date.format(DATE_FMT).to_string()))
    }

    // -- Registrations --

    /// Register a user for an event. The composite UNIQUE key on
    /// (user_id, event_id) makes the store reject a duplicate pair.
    pub fn create_registration(&self, user_id: i64, event_id: i64) -> Result<i64, StoreError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO registrations (user_id, event_id) VALUES (?1, ?2)",
                (user_id, event_id),
            )
            .map_err(|e| {
                if StoreError::is_unique_violation(&e) {
                    StoreError::DuplicateRegistration
                } else {
                    e.into()
                }
            })?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// The events a user is registered for, ascending by date.
    pub fn list_registrations_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<RegisteredEventRow>, StoreError> {
        self.with_conn(|conn| query_registrations_for_user(conn, user_id))
    }
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>, StoreError> {
    let mut stmt =
        conn.prepare("SELECT id, username, password, created_at FROM users WHERE username = ?1")?;

    let row = stmt
        .query_row([username], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                password: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_user_by_id(conn: &Connection, id: i64) -> Result<Option<UserRow>, StoreError> {
    let mut stmt =
        conn.prepare("SELECT id, username, password, created_at FROM users WHERE id = ?1")?;

    let row = stmt
        .query_row([id], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                password: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn event_from_sql_row(row: &rusqlite::Row) -> rusqlite::Result<EventRow> {
    Ok(EventRow {
        id: row.get(0)?,
        name: row.get(1)?,
        event_date: row.get(2)?,
        created_by: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn query_event_by_id(conn: &Connection, id: i64) -> Result<Option<EventRow>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, event_date, created_by, created_at FROM events WHERE id = ?1",
    )?;

    let row = stmt.query_row([id], event_from_sql_row).optional()?;

    Ok(row)
}

fn query_all_events(conn: &Connection) -> Result<Vec<EventRow>, StoreError> {
    let mut stmt =
        conn.prepare("SELECT id, name, event_date, created_by, created_at FROM events")?;

    let rows = stmt
        .query_map([], event_from_sql_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_events_on(conn: &Connection, date: &str) -> Result<Vec<EventRow>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, event_date, created_by, created_at FROM events WHERE event_date = ?1",
    )?;

    let rows = stmt
        .query_map([date], event_from_sql_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_registrations_for_user(
    conn: &Connection,
    user_id: i64,
) -> Result<Vec<RegisteredEventRow>, StoreError> {
    // JOIN events to return name + date in a single query
    let mut stmt = conn.prepare(
        "SELECT e.name, e.event_date
         FROM registrations r
         JOIN events e ON r.event_id = e.id
         WHERE r.user_id = ?1
         ORDER BY e.event_date ASC, e.id ASC",
    )?;

    let rows = stmt
        .query_map([user_id], |row| {
            Ok(RegisteredEventRow {
                event_name: row.get(0)?,
                event_date: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>, StoreError>;
}

impl<T> OptionalExt<T> for Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>, StoreError> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
