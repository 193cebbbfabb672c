use axum_extra::extract::cookie::{Cookie, CookieJar};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64;
use tracing::warn;

use muster_types::api::{FlashLevel, FlashMessage};

pub const FLASH_COOKIE: &str = "flash";

/// Queue a one-shot flash message for the next rendered page. The payload
/// travels as base64(JSON) so it stays cookie-value-safe.
pub fn set(jar: CookieJar, level: FlashLevel, message: &str) -> CookieJar {
    let payload = FlashMessage {
        level,
        message: message.to_string(),
    };
    match serde_json::to_vec(&payload) {
        Ok(bytes) => jar.add(
            Cookie::build((FLASH_COOKIE, B64.encode(bytes)))
                .path("/")
                .build(),
        ),
        Err(e) => {
            warn!("failed to encode flash message: {e}");
            jar
        }
    }
}

/// Consume the pending flash message, clearing its cookie.
pub fn take(jar: CookieJar) -> (CookieJar, Option<FlashMessage>) {
    let encoded = jar.get(FLASH_COOKIE).map(|cookie| cookie.value().to_string());
    let Some(encoded) = encoded else {
        return (jar, None);
    };

    let message = B64
        .decode(&encoded)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok());
    if message.is_none() {
        warn!("discarding undecodable flash cookie");
    }

    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/").build());
    (jar, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_take_round_trips() {
        let jar = set(CookieJar::new(), FlashLevel::Error, "Username already taken.");
        let (jar, message) = take(jar);

        assert_eq!(
            message,
            Some(FlashMessage {
                level: FlashLevel::Error,
                message: "Username already taken.".to_string(),
            })
        );

        // Consumed: a second take finds nothing.
        let (_, message) = take(jar);
        assert!(message.is_none());
    }

    #[test]
    fn take_without_a_pending_message() {
        let (_, message) = take(CookieJar::new());
        assert!(message.is_none());
    }

    #[test]
    fn corrupt_cookie_is_discarded() {
        let jar = CookieJar::new().add(Cookie::new(FLASH_COOKIE, "%%% not base64 %%%"));
        let (_, message) = take(jar);
        assert!(message.is_none());
    }
}
