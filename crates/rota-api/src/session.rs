use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use rota_types::api::Claims;

use crate::AppState;
use crate::error::BoardError;

pub const SESSION_COOKIE: &str = "session";

/// Mint a signed session token bound to a user identity. The server keeps
/// no session table; the signature is the binding.
pub fn start_session(secret: &str, user_id: Uuid, username: &str) -> anyhow::Result<String> {
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

/// Decode and validate a session token. Any failure (bad signature,
/// expired, garbage) reads as "no session".
pub fn current_user(secret: &str, token: &str) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .ok()
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .build()
}

pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

/// The authenticated identity behind a request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub username: String,
}

/// Token is taken from the session cookie, with an Authorization bearer
/// fallback.
pub fn session_from_headers(state: &AppState, headers: &HeaderMap) -> Option<CurrentUser> {
    let jar = CookieJar::from_headers(headers);

    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
        .or_else(|| jar.get(SESSION_COOKIE).map(|c| c.value().to_string()))?;

    let claims = current_user(&state.session_secret, &token)?;

    Some(CurrentUser {
        user_id: claims.sub,
        username: claims.username,
    })
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = BoardError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        session_from_headers(state, &parts.headers).ok_or(BoardError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = start_session("secret", user_id, "alice").unwrap();

        let claims = current_user("secret", &token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = start_session("secret", Uuid::new_v4(), "alice").unwrap();
        assert!(current_user("other-secret", &token).is_none());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let mut token = start_session("secret", Uuid::new_v4(), "alice").unwrap();
        token.push('x');
        assert!(current_user("secret", &token).is_none());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(current_user("secret", "not-a-token").is_none());
    }
}
