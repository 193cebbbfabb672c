//! Database row types — these map directly to SQLite rows.
//! Distinct from the muster-types view models to keep the DB layer
//! independent; dates stay in their stored `YYYY-MM-DD` text form here.

pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub created_at: String,
}

pub struct EventRow {
    pub id: i64,
    pub name: String,
    pub event_date: String,
    pub created_by: Option<i64>,
    pub created_at: String,
}

pub struct RegisteredEventRow {
    pub event_name: String,
    pub event_date: String,
}
