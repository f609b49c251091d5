use axum::extract::State;
use axum::Json;
use pitch_core::SessionSnapshot;

use crate::state::AppState;

/// GET /api/session: full snapshot. Names of unrevealed checkpoints are masked.
pub async fn get_session(State(app): State<AppState>) -> Json<SessionSnapshot> {
    Json(app.session().snapshot())
}
