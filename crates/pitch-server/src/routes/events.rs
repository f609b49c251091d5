use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;

use crate::state::AppState;

/// GET /api/events: SSE stream; event name is the event kind, data its JSON.
///
/// A subscriber that falls behind skips the missed events; the next clock
/// event or a `GET /api/session` brings it back in sync.
pub async fn sse_events(State(app): State<AppState>) -> impl axum::response::IntoResponse {
    let rx = app.event_tx.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|msg| {
        let ev = msg.ok()?;
        match Event::default().event(ev.kind()).json_data(&ev) {
            Ok(event) => Some(Ok::<Event, Infallible>(event)),
            Err(e) => {
                tracing::warn!(kind = ev.kind(), error = %e, "failed to encode event");
                None
            }
        }
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}
