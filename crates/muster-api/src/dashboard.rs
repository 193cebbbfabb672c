use std::collections::BTreeMap;

use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{Datelike, Local, NaiveDate};
use tracing::warn;

use muster_calendar as calendar;
use muster_db::StoreError;
use muster_db::models::EventRow;
use muster_types::api::{DashboardQuery, DashboardView};
use muster_types::models::{Event, RegisteredEvent};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::flash;
use crate::middleware::Claims;

/// GET /dashboard — the month view: grid cells, per-day events, and the
/// caller's own registrations. Year/month default to the current date.
pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
    Extension(claims): Extension<Claims>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let today = Local::now().date_naive();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());

    let days = calendar::month_grid(year, month)
        .map_err(|e| ApiError::validation(e.to_string(), "/dashboard"))?;

    let (prev_year, prev_month) = calendar::prev_month(year, month);
    let (next_year, next_month) = calendar::next_month(year, month);

    // Run blocking DB reads off the async runtime
    let db = state.clone();
    let user_id = claims.sub;
    let (event_rows, registration_rows) = tokio::task::spawn_blocking(move || {
        let events = db.db.list_all_events()?;
        let registrations = db.db.list_registrations_for_user(user_id)?;
        Ok::<_, StoreError>((events, registrations))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("join error: {e}")))??;

    let events: Vec<Event> = event_rows.into_iter().filter_map(event_from_row).collect();
    let events_by_day: BTreeMap<u32, Vec<Event>> =
        calendar::bucket_by_day(year, month, events, |event| event.event_date);

    let registrations: Vec<RegisteredEvent> = registration_rows
        .into_iter()
        .filter_map(|row| match row.event_date.parse::<NaiveDate>() {
            Ok(event_date) => Some(RegisteredEvent {
                name: row.event_name,
                event_date,
            }),
            Err(e) => {
                warn!("Corrupt event_date '{}': {e}", row.event_date);
                None
            }
        })
        .collect();

    let (jar, flash) = flash::take(jar);

    Ok((
        jar,
        Json(DashboardView {
            username: claims.username,
            year,
            month,
            month_name: calendar::month_name(month).unwrap_or_default().to_string(),
            prev_year,
            prev_month,
            next_year,
            next_month,
            days,
            events_by_day,
            registrations,
            flash,
        }),
    ))
}

pub(crate) fn event_from_row(row: EventRow) -> Option<Event> {
    match row.event_date.parse::<NaiveDate>() {
        Ok(event_date) => Some(Event {
            id: row.id,
            name: row.name,
            event_date,
            created_by: row.created_by,
        }),
        Err(e) => {
            warn!("Corrupt event_date '{}' on event {}: {e}", row.event_date, row.id);
            None
        }
    }
}
