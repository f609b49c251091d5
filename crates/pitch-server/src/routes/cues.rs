use axum::extract::{Path, State};
use axum::Json;

use crate::events::HostEvent;
use crate::state::AppState;

/// POST /api/cues/:cue/ended: the browser finished playing a cue.
pub async fn cue_ended(
    State(app): State<AppState>,
    Path(cue): Path<String>,
) -> Json<serde_json::Value> {
    Json(settle(&app, &cue))
}

/// POST /api/cues/:cue/failed: the browser could not play a cue. Handled
/// like a cue that ended.
pub async fn cue_failed(
    State(app): State<AppState>,
    Path(cue): Path<String>,
) -> Json<serde_json::Value> {
    tracing::warn!(%cue, "browser failed to play cue");
    Json(settle(&app, &cue))
}

fn settle(app: &AppState, cue: &str) -> serde_json::Value {
    let cleared = app.session().cue_finished(cue);
    let scene_closed = app.scenes().finished(cue);
    if scene_closed {
        app.publish(HostEvent::SceneClosed);
    }
    serde_json::json!({ "cue": cue, "cleared": cleared, "scene_closed": scene_closed })
}
