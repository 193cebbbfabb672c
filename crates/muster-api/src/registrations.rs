use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use muster_db::StoreError;
use muster_types::api::FlashLevel;

use crate::auth::AppState;
use crate::error::ApiError;
use crate::flash;
use crate::middleware::Claims;

/// GET /register_event/{event_id} — register the session user for an
/// event. The store's composite key rejects a second registration for the
/// same (user, event) pair, so racing duplicates cannot both land.
pub async fn register_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    Extension(claims): Extension<Claims>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let user_id = claims.sub;
    let outcome = tokio::task::spawn_blocking(move || {
        if db.db.get_event_by_id(event_id)?.is_none() {
            return Ok(None);
        }
        db.db.create_registration(user_id, event_id).map(Some)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("join error: {e}")))?;

    match outcome {
        Ok(Some(_)) => {
            info!(user_id, event_id, "registration created");
            Ok((
                flash::set(jar, FlashLevel::Success, "Registered for event successfully!"),
                Redirect::to("/dashboard"),
            ))
        }
        Ok(None) => Err(ApiError::NotFound),
        Err(StoreError::DuplicateRegistration) => Err(ApiError::conflict(
            "You are already registered for this event.",
            "/dashboard",
        )),
        Err(e) => Err(e.into()),
    }
}
