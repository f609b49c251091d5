pub mod driver;
pub mod error;
pub mod events;
pub mod routes;
pub mod state;
pub mod worker;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use events::{HostEvent, ServerEvent};
pub use state::AppState;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = app_state.config.server.static_dir.clone();

    let router = Router::new()
        // Events (SSE)
        .route("/api/events", get(routes::events::sse_events))
        // Session
        .route("/api/session", get(routes::session::get_session))
        .route("/api/config", get(routes::config::get_config))
        // Timer
        .route("/api/timer/start", post(routes::timer::start))
        .route("/api/timer/pause", post(routes::timer::pause))
        .route("/api/timer/reset", post(routes::timer::reset))
        // Mode
        .route("/api/mode", put(routes::mode::put_mode))
        // Segments
        .route("/api/segments", get(routes::segments::list_segments))
        .route("/api/segments/reselect", post(routes::segments::reselect))
        .route(
            "/api/segments/{name}/select",
            post(routes::segments::select_segment),
        )
        // Cues
        .route("/api/cues/{cue}/ended", post(routes::cues::cue_ended))
        .route("/api/cues/{cue}/failed", post(routes::cues::cue_failed))
        // Scene picker
        .route("/api/scenes", get(routes::scenes::list_scenes))
        .route("/api/scenes/close", post(routes::scenes::close_scenes))
        .route("/api/scenes/{scene}", post(routes::scenes::select_scene))
        // Checkpoints
        .route(
            "/api/checkpoints/{minutes}/reveal",
            post(routes::checkpoints::reveal),
        )
        .route(
            "/api/checkpoints/{minutes}/hide",
            post(routes::checkpoints::hide),
        )
        .route(
            "/api/checkpoints/{minutes}/toggle-reveal",
            post(routes::checkpoints::toggle_reveal),
        )
        .route(
            "/api/checkpoints/{minutes}/swap",
            post(routes::checkpoints::toggle_swap),
        )
        // TMDb proxy
        .route("/api/tmdb/genres", get(routes::tmdb::genres))
        .route("/api/tmdb/random-movie", get(routes::tmdb::random_movie))
        .route("/api/tmdb/popular-actors", get(routes::tmdb::popular_actors));

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router.fallback(not_found),
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

async fn not_found(uri: axum::http::Uri) -> error::AppError {
    error::AppError::not_found(format!("no route for {uri}"))
}

/// Start the pitch timer server.
pub async fn serve(app_state: AppState, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(app_state, listener, open_browser).await
}

/// Start the pitch timer server on a pre-bound listener.
///
/// Unlike `serve`, this accepts a `TcpListener` that was already bound so the
/// caller can read the actual port before starting (useful when `port = 0` and
/// the OS picks a free port).
pub async fn serve_on(
    app_state: AppState,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    if !app_state.tmdb.is_configured() {
        tracing::warn!("TMDB_API_KEY not set; movie and actor segments will report errors");
    }
    let app = build_router(app_state);

    tracing::info!("pitch timer listening on http://localhost:{actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}");
        if let Err(e) = open::that(&url) {
            tracing::warn!(error = %e, "could not open browser");
        }
    }

    axum::serve(listener, app).await?;
    Ok(())
}
