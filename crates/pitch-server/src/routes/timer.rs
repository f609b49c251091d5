use axum::extract::State;
use axum::Json;
use pitch_core::SessionSnapshot;

use crate::state::AppState;

/// POST /api/timer/start: start the countdown and its tick source.
pub async fn start(State(app): State<AppState>) -> Json<SessionSnapshot> {
    let (started, snapshot) = {
        let mut session = app.session();
        let started = session.start();
        (started, session.snapshot())
    };
    if started {
        app.driver.start(app.session.clone());
    }
    Json(snapshot)
}

/// POST /api/timer/pause
pub async fn pause(State(app): State<AppState>) -> Json<SessionSnapshot> {
    app.driver.stop();
    let mut session = app.session();
    session.pause();
    Json(session.snapshot())
}

/// POST /api/timer/reset: stop ticking, restore the start value, clear
/// per-run checkpoint state.
pub async fn reset(State(app): State<AppState>) -> Json<SessionSnapshot> {
    app.driver.stop();
    let mut session = app.session();
    session.reset();
    Json(session.snapshot())
}
