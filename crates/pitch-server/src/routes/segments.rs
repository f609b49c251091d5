use axum::extract::{Path, State};
use axum::Json;
use pitch_core::{Segment, TileOutcome};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/segments: the catalog, in tile order.
pub async fn list_segments(State(app): State<AppState>) -> Json<Vec<Segment>> {
    Json(app.session().catalog().segments().to_vec())
}

/// POST /api/segments/reselect: draw fresh segments (automatic mode only).
pub async fn reselect(State(app): State<AppState>) -> Json<serde_json::Value> {
    let mut session = app.session();
    let reselected = session.reselect();
    Json(serde_json::json!({
        "reselected": reselected,
        "session": session.snapshot(),
    }))
}

/// POST /api/segments/:name/select: a tile click: fills the armed swap slot
/// or plays the tile.
pub async fn select_segment(
    State(app): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<TileOutcome>, AppError> {
    let outcome = app.session().select_tile(&name)?;
    Ok(Json(outcome))
}
