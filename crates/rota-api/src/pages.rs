use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, Redirect};
use serde::Deserialize;
use tera::{Context, Tera};

use crate::AppState;
use crate::error::BoardError;
use crate::session::{self, CurrentUser};

/// Flash-style message passed between redirects.
#[derive(Debug, Deserialize)]
pub struct ErrorQuery {
    pub error: Option<String>,
}

/// The page set ships compiled into the binary.
pub fn templates() -> anyhow::Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("register.html", include_str!("../templates/register.html")),
        ("login.html", include_str!("../templates/login.html")),
        ("home.html", include_str!("../templates/home.html")),
        ("schedule.html", include_str!("../templates/schedule.html")),
        (
            "edit_button.html",
            include_str!("../templates/edit_button.html"),
        ),
    ])?;
    Ok(tera)
}

pub fn render(state: &AppState, name: &str, ctx: &Context) -> Result<Html<String>, BoardError> {
    Ok(Html(state.templates.render(name, ctx)?))
}

pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    match session::session_from_headers(&state, &headers) {
        Some(_) => Redirect::to("/home"),
        None => Redirect::to("/login"),
    }
}

pub async fn home(
    user: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<ErrorQuery>,
) -> Result<Html<String>, BoardError> {
    let mut ctx = Context::new();
    ctx.insert("username", &user.username);
    ctx.insert("error", &query.error);
    render(&state, "home.html", &ctx)
}
