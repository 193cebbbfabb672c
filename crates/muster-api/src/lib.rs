pub mod auth;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod flash;
pub mod middleware;
pub mod registrations;

use axum::{Router, middleware::from_fn_with_state, routing::get};

pub use auth::{AppState, AppStateInner};

/// Assemble the full route tree over the shared state. Layers that only
/// matter in production (CORS, request tracing) are added by the binary.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(auth::home))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/dashboard", get(dashboard::dashboard))
        .route(
            "/add_event",
            get(events::add_event_page).post(events::add_event),
        )
        .route("/register_event/{event_id}", get(registrations::register_event))
        .route("/events/{year}/{month}/{day}", get(events::events_on_day))
        .layer(from_fn_with_state(state.clone(), middleware::require_auth))
        .with_state(state);

    public_routes.merge(protected_routes)
}
