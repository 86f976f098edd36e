use anyhow::anyhow;
use axum::Form;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use tera::Context;
use uuid::Uuid;

use rota_db::models::ScheduleRow;
use rota_types::api::{CreateScheduleForm, OpenScheduleForm, RenamePasswordForm};
use rota_types::models::{Button, Schedule};

use crate::AppState;
use crate::buttons::button_view;
use crate::error::BoardError;
use crate::pages;
use crate::session::CurrentUser;

fn schedule_view(row: &ScheduleRow) -> Result<Schedule, BoardError> {
    Ok(Schedule {
        id: row
            .id
            .parse()
            .map_err(|e| anyhow!("corrupt schedule id '{}': {e}", row.id))?,
        password: row.password.clone(),
    })
}

pub async fn create_schedule(
    _user: CurrentUser,
    State(state): State<AppState>,
    Form(form): Form<CreateScheduleForm>,
) -> Result<Redirect, BoardError> {
    if form.new_password.is_empty() {
        return Err(BoardError::MissingField("schedule password"));
    }

    if state
        .db
        .get_schedule_by_password(&form.new_password)?
        .is_some()
    {
        return Err(BoardError::PasswordAlreadyUsed);
    }

    let schedule_id = Uuid::new_v4();
    state
        .db
        .create_schedule(&schedule_id.to_string(), &form.new_password)?;

    Ok(Redirect::to(&format!("/edit_schedule/{schedule_id}")))
}

/// Locating a schedule needs only its password; no session is required.
/// The edit page this lands on is still session-gated.
pub async fn view_schedule(
    State(state): State<AppState>,
    Form(form): Form<OpenScheduleForm>,
) -> Result<Redirect, BoardError> {
    let schedule = state
        .db
        .get_schedule_by_password(&form.password)?
        .ok_or(BoardError::PasswordNotInUse)?;

    Ok(Redirect::to(&format!("/edit_schedule/{}", schedule.id)))
}

pub async fn edit_schedule(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(schedule_id): Path<Uuid>,
) -> Result<Html<String>, BoardError> {
    let row = state
        .db
        .get_schedule_by_id(&schedule_id.to_string())?
        .ok_or(BoardError::NotFound)?;

    let buttons: Vec<Button> = state
        .db
        .list_buttons(&row.id)?
        .iter()
        .map(button_view)
        .collect::<Result<_, _>>()?;

    let mut ctx = Context::new();
    ctx.insert("schedule", &schedule_view(&row)?);
    ctx.insert("buttons", &buttons);
    pages::render(&state, "schedule.html", &ctx)
}

pub async fn save_password(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(schedule_id): Path<Uuid>,
    Form(form): Form<RenamePasswordForm>,
) -> Result<Redirect, BoardError> {
    let id = schedule_id.to_string();
    let row = state
        .db
        .get_schedule_by_id(&id)?
        .ok_or(BoardError::NotFound)?;

    if form.password.is_empty() {
        return Err(BoardError::MissingField("schedule password"));
    }

    // Renaming to the current password is a no-op success; any other
    // collision is a taken password.
    if let Some(other) = state.db.get_schedule_by_password(&form.password)? {
        if other.id != row.id {
            return Err(BoardError::PasswordAlreadyUsed);
        }
    }

    state.db.rename_schedule_password(&id, &form.password)?;

    Ok(Redirect::to(&format!("/edit_schedule/{schedule_id}")))
}

pub async fn delete_schedule(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(schedule_id): Path<Uuid>,
) -> Result<Redirect, BoardError> {
    // An absent schedule counts as already deleted.
    state.db.delete_schedule(&schedule_id.to_string())?;

    Ok(Redirect::to("/home"))
}
