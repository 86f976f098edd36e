use anyhow::anyhow;
use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::Form;
use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use axum_extra::extract::cookie::CookieJar;
use tera::Context;
use uuid::Uuid;

use rota_types::api::Credentials;

use crate::AppState;
use crate::error::BoardError;
use crate::pages::{self, ErrorQuery};
use crate::session::{self, CurrentUser};

pub async fn register_page(State(state): State<AppState>) -> Result<Html<String>, BoardError> {
    pages::render(&state, "register.html", &Context::new())
}

pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<Credentials>,
) -> Result<Redirect, BoardError> {
    if form.username.is_empty() {
        return Err(BoardError::MissingField("username"));
    }
    if form.password.is_empty() {
        return Err(BoardError::MissingField("password"));
    }

    if state.db.get_user_by_username(&form.username)?.is_some() {
        return Err(BoardError::DuplicateUsername);
    }

    // Hash with Argon2id; only the PHC string is ever stored.
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(form.password.as_bytes(), &salt)
        .map_err(|e| anyhow!("password hashing failed: {e}"))?
        .to_string();

    let user_id = Uuid::new_v4();
    state
        .db
        .create_user(&user_id.to_string(), &form.username, &password_hash)?;

    Ok(Redirect::to("/login"))
}

pub async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<ErrorQuery>,
) -> Result<Html<String>, BoardError> {
    let mut ctx = Context::new();
    ctx.insert("error", &query.error);
    pages::render(&state, "login.html", &ctx)
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<Credentials>,
) -> Result<(CookieJar, Redirect), BoardError> {
    // A missing user and a wrong password surface as the same failure.
    let user = state
        .db
        .get_user_by_username(&form.username)?
        .ok_or(BoardError::AuthFailure)?;

    let parsed_hash = PasswordHash::new(&user.password)
        .map_err(|e| anyhow!("stored password hash for '{}' is malformed: {e}", user.username))?;

    Argon2::default()
        .verify_password(form.password.as_bytes(), &parsed_hash)
        .map_err(|_| BoardError::AuthFailure)?;

    let user_id: Uuid = user
        .id
        .parse()
        .map_err(|e| anyhow!("corrupt user id '{}': {e}", user.id))?;

    let token = session::start_session(&state.session_secret, user_id, &user.username)?;

    Ok((
        jar.add(session::session_cookie(token)),
        Redirect::to("/home"),
    ))
}

pub async fn logout(_user: CurrentUser, jar: CookieJar) -> (CookieJar, Redirect) {
    (
        jar.remove(session::clear_session_cookie()),
        Redirect::to("/login"),
    )
}
