use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use thiserror::Error;
use tracing::error;

/// User-facing failures. Everything here renders as a redirect with an
/// inline message or a plain 400; nothing is fatal to the process.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("a user with that name already exists")]
    DuplicateUsername,
    #[error("invalid username or password")]
    AuthFailure,
    #[error("login required")]
    Unauthenticated,
    #[error("that password is already in use")]
    PasswordAlreadyUsed,
    #[error("that password is not in use yet")]
    PasswordNotInUse,
    #[error("nothing here by that id")]
    NotFound,
    #[error("{0} must not be empty")]
    MissingField(&'static str),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        match self {
            BoardError::DuplicateUsername | BoardError::MissingField(_) => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            BoardError::AuthFailure => {
                redirect_with_error("/login", &self.to_string()).into_response()
            }
            BoardError::Unauthenticated => Redirect::to("/login").into_response(),
            BoardError::PasswordAlreadyUsed
            | BoardError::PasswordNotInUse
            | BoardError::NotFound => {
                redirect_with_error("/home", &self.to_string()).into_response()
            }
            BoardError::Internal(e) => {
                error!("internal error: {e:#}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl From<tera::Error> for BoardError {
    fn from(e: tera::Error) -> Self {
        BoardError::Internal(anyhow::Error::new(e))
    }
}

/// 303 redirect carrying a flash-style message in the `error` query param.
pub fn redirect_with_error(path: &str, message: &str) -> Redirect {
    Redirect::to(&format!("{path}?error={}", urlencoding::encode(message)))
}
