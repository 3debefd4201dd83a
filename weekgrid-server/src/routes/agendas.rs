//! Agenda document and conflict-check endpoints

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;

use weekgrid_core::{Block, Conflict, Schedule, ScheduleSummary, detect_conflict};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/agendas", get(list_agendas))
        .route(
            "/agendas/{slug}",
            get(get_agenda).put(save_agenda).delete(delete_agenda),
        )
        .route("/agendas/{slug}/conflicts", post(check_conflict))
}

/// GET /agendas - List all agendas
async fn list_agendas(
    State(state): State<AppState>,
) -> Result<Json<Vec<ScheduleSummary>>, AppError> {
    let dir = state.agendas()?;
    Ok(Json(dir.list()?))
}

/// GET /agendas/:slug - Load one agenda document
async fn get_agenda(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Schedule>, AppError> {
    let dir = state.agendas()?;
    Ok(Json(dir.load_agenda(&slug)?))
}

/// Response for a successful save
#[derive(Serialize)]
pub struct SaveResponse {
    pub slug: String,
}

/// PUT /agendas/:slug - Replace the whole agenda document
///
/// Full-document replace semantics: whatever was stored before is
/// overwritten. Creating a new agenda this way is subject to the plan's
/// agenda cap.
async fn save_agenda(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(schedule): Json<Schedule>,
) -> Result<Json<SaveResponse>, AppError> {
    let dir = state.agendas()?;

    schedule.validate()?;

    let existing = dir.list()?;
    let is_new = !existing
        .iter()
        .any(|s| s.slug == slug || s.id == schedule.id);
    if is_new && !dir.plan().limits().can_create_agenda(existing.len()) {
        return Err(anyhow::anyhow!(
            "Agenda limit reached on the {} plan",
            dir.plan()
        )
        .into());
    }

    let slug = dir.save(&schedule)?;
    Ok(Json(SaveResponse { slug }))
}

/// DELETE /agendas/:slug - Delete an agenda document
async fn delete_agenda(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<StatusCode, AppError> {
    let dir = state.agendas()?;
    dir.delete(&slug)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /agendas/:slug/conflicts - Check a candidate block without
/// committing it
///
/// Returns the first double-booking the candidate would cause, or null.
/// The write itself stays with the caller; this endpoint only informs.
async fn check_conflict(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(candidate): Json<Block>,
) -> Result<Json<Option<Conflict>>, AppError> {
    let dir = state.agendas()?;
    let schedule = dir.load_agenda(&slug)?;

    Ok(Json(detect_conflict(&candidate, &schedule)?))
}
