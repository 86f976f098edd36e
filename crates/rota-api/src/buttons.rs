use anyhow::anyhow;
use axum::Form;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use tera::Context;
use uuid::Uuid;

use rota_db::models::ButtonRow;
use rota_types::api::ButtonForm;
use rota_types::models::{Button, slot_color};

use crate::AppState;
use crate::error::BoardError;
use crate::pages;
use crate::session::CurrentUser;

pub(crate) fn button_view(row: &ButtonRow) -> Result<Button, BoardError> {
    Ok(Button {
        id: row
            .id
            .parse()
            .map_err(|e| anyhow!("corrupt button id '{}': {e}", row.id))?,
        schedule_id: row.schedule_id.parse().map_err(|e| {
            anyhow!(
                "corrupt schedule id '{}' on button '{}': {e}",
                row.schedule_id,
                row.id
            )
        })?,
        particulars: row.particulars.clone(),
        participant: row.participant.clone(),
        color: row.color.clone(),
    })
}

pub async fn add_button(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(schedule_id): Path<Uuid>,
    Form(form): Form<ButtonForm>,
) -> Result<Redirect, BoardError> {
    let sid = schedule_id.to_string();
    state
        .db
        .get_schedule_by_id(&sid)?
        .ok_or(BoardError::NotFound)?;

    let back = Redirect::to(&format!("/edit_schedule/{schedule_id}"));

    // A slot without particulars is dropped without complaint.
    if form.particulars.is_empty() {
        return Ok(back);
    }

    let button_id = Uuid::new_v4();
    state.db.insert_button(
        &button_id.to_string(),
        &sid,
        &form.particulars,
        &form.participant,
        slot_color(&form.participant),
    )?;

    Ok(back)
}

pub async fn edit_button_page(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(button_id): Path<Uuid>,
) -> Result<Html<String>, BoardError> {
    let row = state
        .db
        .get_button(&button_id.to_string())?
        .ok_or(BoardError::NotFound)?;

    let mut ctx = Context::new();
    ctx.insert("button", &button_view(&row)?);
    pages::render(&state, "edit_button.html", &ctx)
}

pub async fn edit_button(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(button_id): Path<Uuid>,
    Form(form): Form<ButtonForm>,
) -> Result<Redirect, BoardError> {
    let row = state
        .db
        .get_button(&button_id.to_string())?
        .ok_or(BoardError::NotFound)?;

    let back = Redirect::to(&format!("/edit_schedule/{}", row.schedule_id));

    // Same rule as add: no particulars, no change.
    if form.particulars.is_empty() {
        return Ok(back);
    }

    state.db.update_button(
        &row.id,
        &form.particulars,
        &form.participant,
        slot_color(&form.participant),
    )?;

    Ok(back)
}

pub async fn delete_button(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(button_id): Path<Uuid>,
) -> Result<Redirect, BoardError> {
    // A missing button bounces to the dashboard instead of erroring.
    match state.db.get_button(&button_id.to_string())? {
        Some(row) => {
            state.db.delete_button(&row.id)?;
            Ok(Redirect::to(&format!("/edit_schedule/{}", row.schedule_id)))
        }
        None => Ok(Redirect::to("/home")),
    }
}
