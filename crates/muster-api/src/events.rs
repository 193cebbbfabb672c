use axum::{
    Extension, Json,
    extract::{Form, Path, State},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::NaiveDate;
use tracing::info;

use muster_types::api::{AddEventForm, DayEventsView, FlashLevel, PageView};
use muster_types::models::Event;

use crate::auth::AppState;
use crate::dashboard::event_from_row;
use crate::error::ApiError;
use crate::flash;
use crate::middleware::Claims;

pub async fn add_event_page(jar: CookieJar) -> impl IntoResponse {
    let (jar, flash) = flash::take(jar);
    (jar, Json(PageView { flash }))
}

/// POST /add_event — create an event attributed to the session user.
pub async fn add_event(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    jar: CookieJar,
    Form(form): Form<AddEventForm>,
) -> Result<impl IntoResponse, ApiError> {
    let name = form.name.trim().to_string();

    if name.is_empty() || form.event_date.is_empty() {
        return Err(ApiError::validation(
            "Please provide event name and date.",
            "/add_event",
        ));
    }

    let event_date: NaiveDate = form.event_date.parse().map_err(|_| {
        ApiError::validation(
            "Please provide a valid event date (YYYY-MM-DD).",
            "/add_event",
        )
    })?;

    let db = state.clone();
    let user_id = claims.sub;
    let stored_name = name.clone();
    let event_id = tokio::task::spawn_blocking(move || {
        db.db.create_event(&stored_name, event_date, Some(user_id))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("join error: {e}")))??;

    info!(event_id, name = %name, %event_date, "event created");

    Ok((
        flash::set(jar, FlashLevel::Success, "Event added successfully!"),
        Redirect::to("/dashboard"),
    ))
}

/// GET /events/{year}/{month}/{day} — the events on one exact date.
/// A day that doesn't exist on the calendar is a 404, not a failure.
pub async fn events_on_day(
    State(state): State<AppState>,
    Path((year, month, day)): Path<(i32, u32, u32)>,
    Extension(_claims): Extension<Claims>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(ApiError::NotFound)?;

    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.list_events_on(date))
        .await
        .map_err(|e| ApiError::Internal(format!("join error: {e}")))??;

    let events: Vec<Event> = rows.into_iter().filter_map(event_from_row).collect();

    let (jar, flash) = flash::take(jar);
    Ok((
        jar,
        Json(DayEventsView {
            year,
            month,
            day,
            events,
            flash,
        }),
    ))
}
