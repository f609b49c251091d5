use std::time::Duration;

use axum::http::StatusCode;
use http_body_util::BodyExt;
use pitch_core::config::Config;
use pitch_server::{build_router, AppState};
use tempfile::TempDir;
use tmdb_client::TmdbClient;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn app_state() -> AppState {
    AppState::with_seed(Config::default(), TmdbClient::new(None), 42).unwrap()
}

async fn send(
    app: axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, Vec<u8>) {
    let builder = axum::http::Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(axum::body::Body::empty()).unwrap(),
    };
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

fn json(bytes: &[u8]) -> serde_json::Value {
    serde_json::from_slice(bytes).unwrap_or(serde_json::Value::Null)
}

/// Send a GET request via `oneshot` and return (status, parsed JSON body).
async fn get(state: &AppState, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = send(build_router(state.clone()), "GET", uri, None).await;
    (status, json(&body))
}

/// Send a body-less POST request and return (status, parsed JSON body).
async fn post(state: &AppState, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = send(build_router(state.clone()), "POST", uri, None).await;
    (status, json(&body))
}

/// Send a PUT request with a JSON body and return (status, parsed JSON body).
async fn put_json(
    state: &AppState,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let (status, body) = send(build_router(state.clone()), "PUT", uri, Some(body)).await;
    (status, json(&body))
}

async fn automatic(state: &AppState) -> serde_json::Value {
    let (status, json) = put_json(state, "/api/mode", serde_json::json!({ "mode": "automatic" })).await;
    assert_eq!(status, StatusCode::OK);
    json
}

// ---------------------------------------------------------------------------
// Session / timer
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_session_returns_idle_manual_snapshot() {
    let state = app_state();
    let (status, json) = get(&state, "/api/session").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["mode"], "manual");
    assert_eq!(json["clock"]["display"], "30:00");
    assert_eq!(json["clock"]["running"], false);
    assert_eq!(json["checkpoints"].as_array().unwrap().len(), 2);
    assert_eq!(json["checkpoints"][0]["label"], "20:00");
    assert_eq!(json["checkpoints"][0]["assigned"], false);
    assert_eq!(json["segments"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn start_pause_and_reset() {
    let state = app_state();

    let (status, json) = post(&state, "/api/timer/start").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["clock"]["running"], true);
    assert!(state.driver.is_active());

    let (_, json) = post(&state, "/api/timer/pause").await;
    assert_eq!(json["clock"]["running"], false);
    assert!(!state.driver.is_active());

    let (_, json) = post(&state, "/api/timer/reset").await;
    assert_eq!(json["clock"]["remaining_seconds"], 1800);
    assert_eq!(json["clock"]["running"], false);
}

#[tokio::test]
async fn get_config_returns_effective_config() {
    let state = app_state();
    let (status, json) = get(&state, "/api/config").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["timer"]["total_seconds"], 1800);
    assert_eq!(json["notification"]["display_seconds"], 5);
}

// ---------------------------------------------------------------------------
// Mode / reveal / swap
// ---------------------------------------------------------------------------

#[tokio::test]
async fn automatic_mode_assigns_masked_segments() {
    let state = app_state();
    let json = automatic(&state).await;

    assert_eq!(json["mode"], "automatic");
    for row in json["checkpoints"].as_array().unwrap() {
        assert_eq!(row["assigned"], true);
        assert_eq!(row["revealed"], false);
        assert!(row.get("name").is_none(), "unrevealed names are masked");
    }
}

#[tokio::test]
async fn invalid_mode_is_rejected() {
    let state = app_state();
    let (status, json) = put_json(&state, "/api/mode", serde_json::json!({ "mode": "turbo" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("turbo"));
}

#[tokio::test]
async fn reselect_is_a_noop_in_manual_mode() {
    let state = app_state();
    let (_, json) = post(&state, "/api/segments/reselect").await;
    assert_eq!(json["reselected"], false);

    automatic(&state).await;
    let (_, json) = post(&state, "/api/segments/reselect").await;
    assert_eq!(json["reselected"], true);
    assert_eq!(json["session"]["checkpoints"][1]["assigned"], true);
}

#[tokio::test]
async fn toggle_reveal_exposes_the_name() {
    let state = app_state();
    automatic(&state).await;

    let (status, json) = post(&state, "/api/checkpoints/20/toggle-reveal").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["revealed"], true);

    let (_, json) = get(&state, "/api/session").await;
    assert!(json["checkpoints"][0]["name"].is_string());
    assert!(json["checkpoints"][1].get("name").is_none());

    let (_, json) = post(&state, "/api/checkpoints/20:00/hide").await;
    assert_eq!(json["changed"], true);
    assert_eq!(json["revealed"], false);
}

#[tokio::test]
async fn checkpoint_errors_map_to_statuses() {
    let state = app_state();
    let (status, _) = post(&state, "/api/checkpoints/15/reveal").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = post(&state, "/api/checkpoints/soon/reveal").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn swap_flow_replaces_the_armed_checkpoint() {
    let state = app_state();
    automatic(&state).await;

    let (_, json) = post(&state, "/api/checkpoints/10/swap").await;
    assert_eq!(json["swap_target"], 10);

    let (status, json) = post(&state, "/api/segments/Studio%20Note/select").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "swapped");
    assert_eq!(json["checkpoint"], 10);

    let (_, json) = get(&state, "/api/session").await;
    assert!(json["swap_target"].is_null());
    assert!(json["checkpoints"][1].get("name").is_none(), "swap keeps the row masked");

    post(&state, "/api/checkpoints/10/reveal").await;
    let (_, json) = get(&state, "/api/session").await;
    assert_eq!(json["checkpoints"][1]["name"], "Studio Note");
}

// ---------------------------------------------------------------------------
// Tiles / cues
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tile_click_plays_then_stops() {
    let state = app_state();

    let (status, json) = post(&state, "/api/segments/Lightning%20Round/select").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "played");
    assert_eq!(json["cue"], "lightning-round");

    let (_, json) = get(&state, "/api/session").await;
    assert_eq!(json["playing_cue"], "lightning-round");

    let (_, json) = post(&state, "/api/segments/Lightning%20Round/select").await;
    assert_eq!(json["outcome"], "stopped");
}

#[tokio::test]
async fn cue_ended_clears_playing_state() {
    let state = app_state();
    post(&state, "/api/segments/Crunch%20the%20Numbers/select").await;

    let (_, json) = post(&state, "/api/cues/crunch-numbers/ended").await;
    assert_eq!(json["cleared"], true);
    let (_, json) = get(&state, "/api/session").await;
    assert!(json["playing_cue"].is_null());
}

#[tokio::test]
async fn unknown_tile_is_404() {
    let state = app_state();
    let (status, json) = post(&state, "/api/segments/Nope/select").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("Nope"));
}

#[tokio::test]
async fn list_segments_returns_catalog_in_order() {
    let state = app_state();
    let (status, json) = get(&state, "/api/segments").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names[0], "Lightning Round");
    assert_eq!(names[5], "Studio Note");
    assert_eq!(json[3]["actions"][1]["type"], "random_actors");
}

#[tokio::test]
async fn casting_tile_publishes_cue_and_fetch_failure() {
    let state = app_state();
    let mut rx = state.event_tx.subscribe();

    post(&state, "/api/segments/Casting/select").await;

    let mut kinds = Vec::new();
    let collected = tokio::time::timeout(Duration::from_secs(5), async {
        while let Ok(ev) = rx.recv().await {
            kinds.push(ev.kind());
            if ev.kind() == "fetch_failed" {
                break;
            }
        }
    })
    .await;
    assert!(collected.is_ok(), "events so far: {kinds:?}");
    assert!(kinds.contains(&"cue_changed"));
    assert!(kinds.contains(&"cue"));
}

// ---------------------------------------------------------------------------
// Scene picker
// ---------------------------------------------------------------------------

fn drain(rx: &mut tokio::sync::broadcast::Receiver<pitch_server::ServerEvent>) -> Vec<serde_json::Value> {
    let mut out = Vec::new();
    while let Ok(ev) = rx.try_recv() {
        out.push(serde_json::to_value(&ev).unwrap());
    }
    out
}

#[tokio::test]
async fn scene_pick_plays_cue_and_cue_end_closes_picker() {
    let state = app_state();
    let mut rx = state.event_tx.subscribe();

    post(&state, "/api/segments/Show%20Me%20a%20Scene/select").await;
    let opened = tokio::time::timeout(Duration::from_secs(5), async {
        while let Ok(ev) = rx.recv().await {
            if ev.kind() == "scene_picker" {
                return serde_json::to_value(&ev).unwrap();
            }
        }
        serde_json::Value::Null
    })
    .await
    .unwrap();
    assert_eq!(opened["scenes"][1]["name"], "action");

    let (status, json) = post(&state, "/api/scenes/action").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cue"], "scene-action");
    assert!(json["stopped"].is_null());

    let (_, json) = post(&state, "/api/scenes/gloomy").await;
    assert_eq!(json["stopped"], "scene-action");
    let events = drain(&mut rx);
    let types: Vec<_> = events.iter().map(|e| e["type"].as_str().unwrap_or("")).collect();
    assert_eq!(types, vec!["cue", "cue_stop", "cue"]);
    assert_eq!(events[1]["cue"], "scene-action");
    assert_eq!(events[2]["cue"], "scene-gloomy");

    // A cue that is not the scene cue leaves the picker open.
    let (_, json) = post(&state, "/api/cues/scene-action/ended").await;
    assert_eq!(json["scene_closed"], false);

    let (_, json) = post(&state, "/api/cues/scene-gloomy/ended").await;
    assert_eq!(json["scene_closed"], true);
    let types: Vec<_> = drain(&mut rx)
        .iter()
        .map(|e| e["type"].as_str().unwrap_or("").to_string())
        .collect();
    assert_eq!(types, vec!["scene_closed"]);

    let (_, json) = get(&state, "/api/scenes").await;
    assert_eq!(json["open"], false);
    assert!(json["selected"].is_null());
    assert_eq!(json["scenes"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn failed_scene_cue_closes_picker() {
    let state = app_state();
    post(&state, "/api/scenes/comedic").await;
    let (status, json) = post(&state, "/api/cues/scene-comedic/failed").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["scene_closed"], true);
    assert!(!state.scenes().is_open());
}

#[tokio::test]
async fn closing_picker_stops_scene_cue() {
    let state = app_state();
    post(&state, "/api/scenes/trailer").await;
    let mut rx = state.event_tx.subscribe();

    let (status, json) = post(&state, "/api/scenes/close").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["stopped"], "scene-trailer");
    let types: Vec<_> = drain(&mut rx)
        .iter()
        .map(|e| e["type"].as_str().unwrap_or("").to_string())
        .collect();
    assert_eq!(types, vec!["cue_stop", "scene_closed"]);
}

#[tokio::test]
async fn unknown_scene_is_404() {
    let state = app_state();
    let (status, json) = post(&state, "/api/scenes/musical").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "unknown scene: musical");
}

// ---------------------------------------------------------------------------
// TMDb proxy
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tmdb_without_key_is_503() {
    let state = app_state();
    let (status, json) = get(&state, "/api/tmdb/genres").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"], "TMDb API key not configured");
}

#[tokio::test]
async fn tmdb_genres_are_proxied() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/genre/movie/list"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"genres": [{"id": 18, "name": "Drama"}]})),
        )
        .mount(&server)
        .await;

    let tmdb = TmdbClient::new(Some("key".into())).with_base_url(server.uri());
    let state = AppState::new(Config::default(), tmdb).unwrap();
    let (status, json) = get(&state, "/api/tmdb/genres").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["genres"][0]["name"], "Drama");
}

#[tokio::test]
async fn tmdb_upstream_error_is_502() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/person/popular"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let tmdb = TmdbClient::new(Some("key".into())).with_base_url(server.uri());
    let state = AppState::new(Config::default(), tmdb).unwrap();
    let (status, _) = get(&state, "/api/tmdb/popular-actors").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

// ---------------------------------------------------------------------------
// Static assets
// ---------------------------------------------------------------------------

#[tokio::test]
async fn static_dir_is_served_as_fallback() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>pitch</h1>").unwrap();

    let mut config = Config::default();
    config.server.static_dir = Some(dir.path().to_path_buf());
    let state = AppState::new(config, TmdbClient::new(None)).unwrap();

    let (status, body) = send(build_router(state), "GET", "/index.html", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "<h1>pitch</h1>");
}

#[tokio::test]
async fn unknown_path_without_static_dir_is_404() {
    let state = app_state();
    let (status, json) = get(&state, "/nothing-here").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("/nothing-here"));
}
