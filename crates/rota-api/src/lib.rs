pub mod auth;
pub mod buttons;
pub mod error;
pub mod pages;
pub mod schedules;
pub mod session;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tera::Tera;
use tower_http::trace::TraceLayer;

use rota_db::Database;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub session_secret: String,
    pub templates: Tera,
}

pub fn build_state(db: Database, session_secret: String) -> anyhow::Result<AppState> {
    Ok(Arc::new(AppStateInner {
        db,
        session_secret,
        templates: pages::templates()?,
    }))
}

/// The full route table. Session-gated handlers take a `CurrentUser`
/// argument; everything else is open. Opening a schedule by password
/// (`/view_schedule`) is deliberately ungated: the password only locates
/// the schedule, and the edit page it redirects to checks the session.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/home", get(pages::home))
        .route("/create_schedule", post(schedules::create_schedule))
        .route("/view_schedule", post(schedules::view_schedule))
        .route(
            "/edit_schedule/{schedule_id}",
            get(schedules::edit_schedule).post(buttons::add_button),
        )
        .route("/save_password/{schedule_id}", post(schedules::save_password))
        .route(
            "/delete_schedule/{schedule_id}",
            post(schedules::delete_schedule),
        )
        .route(
            "/edit_button/{button_id}",
            get(buttons::edit_button_page).post(buttons::edit_button),
        )
        .route("/delete_button/{button_id}", post(buttons::delete_button))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
