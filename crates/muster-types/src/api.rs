use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use muster_calendar::GridDay;

use crate::models::{Event, RegisteredEvent};

// -- Flash --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    Success,
    Error,
}

/// One-shot notification rendered on the page that follows a redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

// -- Forms --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddEventForm {
    pub name: String,
    pub event_date: String,
}

// -- Queries --

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

// -- Views --

/// Context for a bare form page (login, register, add-event).
#[derive(Debug, Serialize)]
pub struct PageView {
    pub flash: Option<FlashMessage>,
}

/// Everything the month view needs: the flattened grid, the events of the
/// month keyed by day, and the caller's own registrations.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub username: String,
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub prev_year: i32,
    pub prev_month: u32,
    pub next_year: i32,
    pub next_month: u32,
    pub days: Vec<GridDay>,
    pub events_by_day: BTreeMap<u32, Vec<Event>>,
    pub registrations: Vec<RegisteredEvent>,
    pub flash: Option<FlashMessage>,
}

/// The events scheduled on one exact date.
#[derive(Debug, Serialize)]
pub struct DayEventsView {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub events: Vec<Event>,
    pub flash: Option<FlashMessage>,
}
