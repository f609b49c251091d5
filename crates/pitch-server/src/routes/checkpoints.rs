use axum::extract::{Path, State};
use axum::Json;
use pitch_core::Checkpoint;

use crate::error::AppError;
use crate::state::AppState;

fn parse(minutes: &str) -> Result<Checkpoint, AppError> {
    Ok(minutes.parse::<Checkpoint>()?)
}

/// POST /api/checkpoints/:minutes/reveal
pub async fn reveal(
    State(app): State<AppState>,
    Path(minutes): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let checkpoint = parse(&minutes)?;
    let mut session = app.session();
    let changed = session.reveal(checkpoint)?;
    Ok(Json(serde_json::json!({
        "checkpoint": checkpoint,
        "changed": changed,
        "revealed": session.is_revealed(checkpoint),
    })))
}

/// POST /api/checkpoints/:minutes/hide
pub async fn hide(
    State(app): State<AppState>,
    Path(minutes): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let checkpoint = parse(&minutes)?;
    let mut session = app.session();
    let changed = session.hide(checkpoint)?;
    Ok(Json(serde_json::json!({
        "checkpoint": checkpoint,
        "changed": changed,
        "revealed": session.is_revealed(checkpoint),
    })))
}

/// POST /api/checkpoints/:minutes/toggle-reveal
pub async fn toggle_reveal(
    State(app): State<AppState>,
    Path(minutes): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let checkpoint = parse(&minutes)?;
    let revealed = app.session().toggle_reveal(checkpoint)?;
    Ok(Json(serde_json::json!({
        "checkpoint": checkpoint,
        "revealed": revealed,
    })))
}

/// POST /api/checkpoints/:minutes/swap: arm or disarm swap mode for the row.
pub async fn toggle_swap(
    State(app): State<AppState>,
    Path(minutes): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let checkpoint = parse(&minutes)?;
    let swap_target = app.session().toggle_swap_mode(checkpoint)?;
    Ok(Json(serde_json::json!({
        "checkpoint": checkpoint,
        "swap_target": swap_target,
    })))
}
