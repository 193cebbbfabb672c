use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{
    Json,
    extract::{Form, State},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{EncodingKey, Header, encode};
use tracing::info;

use muster_db::{Database, StoreError};
use muster_types::api::{FlashLevel, LoginForm, PageView, RegisterForm};

use crate::error::ApiError;
use crate::flash;
use crate::middleware::{self, Claims};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub session_secret: String,
}

/// GET / — send the visitor wherever their session points.
pub async fn home(State(state): State<AppState>, jar: CookieJar) -> Redirect {
    if middleware::session_claims(&jar, &state.session_secret).is_some() {
        Redirect::to("/dashboard")
    } else {
        Redirect::to("/login")
    }
}

pub async fn register_page(jar: CookieJar) -> impl IntoResponse {
    let (jar, flash) = flash::take(jar);
    (jar, Json(PageView { flash }))
}

pub async fn login_page(jar: CookieJar) -> impl IntoResponse {
    let (jar, flash) = flash::take(jar);
    (jar, Json(PageView { flash }))
}

/// POST /register — create an account, then send the user to login.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<impl IntoResponse, ApiError> {
    let username = form.username.trim().to_string();

    if username.is_empty() || form.password.is_empty() || form.confirm_password.is_empty() {
        return Err(ApiError::validation(
            "Please fill in all fields.",
            "/register",
        ));
    }
    if form.password != form.confirm_password {
        return Err(ApiError::validation(
            "Passwords do not match.",
            "/register",
        ));
    }

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(form.password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))?
        .to_string();

    let db = state.clone();
    let stored_name = username.clone();
    let created =
        tokio::task::spawn_blocking(move || db.db.create_user(&stored_name, &password_hash))
            .await
            .map_err(|e| ApiError::Internal(format!("join error: {e}")))?;

    match created {
        Ok(user_id) => {
            info!(user_id, username = %username, "account created");
            Ok((
                flash::set(
                    jar,
                    FlashLevel::Success,
                    "Account successfully created! Please login.",
                ),
                Redirect::to("/login"),
            ))
        }
        Err(StoreError::DuplicateUsername) => {
            Err(ApiError::conflict("Username already taken.", "/register"))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /login — verify credentials and establish the session cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, ApiError> {
    let username = form.username.trim().to_string();

    let db = state.clone();
    let lookup = username.clone();
    let user = tokio::task::spawn_blocking(move || db.db.get_user_by_username(&lookup))
        .await
        .map_err(|e| ApiError::Internal(format!("join error: {e}")))??
        .ok_or(ApiError::BadCredentials)?;

    // Verify password against the stored argon2 hash
    let parsed_hash = PasswordHash::new(&user.password).map_err(|e| {
        ApiError::Internal(format!("corrupt password hash for {}: {e}", user.username))
    })?;

    Argon2::default()
        .verify_password(form.password.as_bytes(), &parsed_hash)
        .map_err(|_| ApiError::BadCredentials)?;

    let token = create_token(&state.session_secret, user.id, &user.username)?;

    info!(user_id = user.id, username = %user.username, "login");

    let jar = jar.add(middleware::session_cookie(token));
    Ok((jar, Redirect::to("/dashboard")))
}

/// GET /logout — drop the session and bounce to login.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = jar.remove(middleware::session_removal_cookie());
    let jar = flash::set(jar, FlashLevel::Success, "You have logged out.");
    (jar, Redirect::to("/login"))
}

pub(crate) fn create_token(
    secret: &str,
    user_id: i64,
    username: &str,
) -> Result<String, ApiError> {
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::days(30)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_verifies_only_the_right_password() {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(b"password123", &salt)
            .unwrap()
            .to_string();
        assert_ne!(hash, "password123"); // never the plaintext

        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"password123", &parsed)
                .is_ok()
        );
        assert!(
            Argon2::default()
                .verify_password(b"wrong", &parsed)
                .is_err()
        );
    }
}
