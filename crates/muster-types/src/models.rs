use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A calendar event as exposed to views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub event_date: NaiveDate,
    pub created_by: Option<i64>,
}

/// An event the caller is registered for, as listed on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredEvent {
    pub name: String,
    pub event_date: NaiveDate,
}
