use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::error;

use muster_db::StoreError;
use muster_types::api::FlashLevel;

use crate::flash;

/// Request-level failures. The browser-facing variants become a flash
/// message plus a redirect to a sensible prior page; the rest map to bare
/// status codes with details kept in the server log.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation { message: String, back: &'static str },

    #[error("{message}")]
    Conflict { message: String, back: &'static str },

    #[error("invalid username or password")]
    BadCredentials,

    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>, back: &'static str) -> Self {
        Self::Validation {
            message: message.into(),
            back,
        }
    }

    pub fn conflict(message: impl Into<String>, back: &'static str) -> Self {
        Self::Conflict {
            message: message.into(),
            back,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation { message, back } | ApiError::Conflict { message, back } => {
                let jar = flash::set(CookieJar::new(), FlashLevel::Error, &message);
                (jar, Redirect::to(back)).into_response()
            }
            ApiError::BadCredentials => {
                let jar = flash::set(
                    CookieJar::new(),
                    FlashLevel::Error,
                    "Invalid username or password.",
                );
                (jar, Redirect::to("/login")).into_response()
            }
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Store(e) => {
                error!("store failure: {e}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            ApiError::Token(e) => {
                error!("token failure: {e}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            ApiError::Internal(msg) => {
                error!("{msg}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
