use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppError;
use crate::events::HostEvent;
use crate::state::AppState;

/// GET /api/scenes: picker choices and current picker state.
pub async fn list_scenes(State(app): State<AppState>) -> Json<serde_json::Value> {
    let picker = app.scenes();
    Json(serde_json::json!({
        "scenes": app.config.scenes,
        "open": picker.is_open(),
        "selected": picker.selected(),
    }))
}

/// POST /api/scenes/:scene: pick a scene type and play its cue.
pub async fn select_scene(
    State(app): State<AppState>,
    Path(scene): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Some(scene_type) = app.config.scene(&scene) else {
        return Err(AppError::not_found(format!("unknown scene: {scene}")));
    };
    let change = app.scenes().select(&scene_type.name, &scene_type.cue);
    if let Some(cue) = change.stop.clone() {
        app.publish(HostEvent::CueStop { cue });
    }
    if let Some(cue) = change.start.clone() {
        app.publish(HostEvent::Cue { cue });
    }
    Ok(Json(serde_json::json!({
        "scene": scene_type.name,
        "cue": scene_type.cue,
        "stopped": change.stop,
    })))
}

/// POST /api/scenes/close: dismiss the picker, stopping its cue.
pub async fn close_scenes(State(app): State<AppState>) -> Json<serde_json::Value> {
    let stopped = app.scenes().close();
    if let Some(cue) = stopped.clone() {
        app.publish(HostEvent::CueStop { cue });
    }
    app.publish(HostEvent::SceneClosed);
    Json(serde_json::json!({ "stopped": stopped }))
}
