use axum::extract::State;
use axum::Json;
use pitch_core::{Mode, SessionSnapshot};

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct ModeBody {
    pub mode: String,
}

/// PUT /api/mode: switch between manual and automatic.
pub async fn put_mode(
    State(app): State<AppState>,
    Json(body): Json<ModeBody>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let mode: Mode = body.mode.parse()?;
    let mut session = app.session();
    session.set_mode(mode);
    Ok(Json(session.snapshot()))
}
