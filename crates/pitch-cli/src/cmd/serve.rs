use anyhow::Context;
use pitch_core::config::Config;
use pitch_server::AppState;
use tmdb_client::TmdbClient;

pub fn run(
    config: Config,
    port: Option<u16>,
    no_open: bool,
    tmdb_api_key: Option<String>,
) -> anyhow::Result<()> {
    let port = port.unwrap_or(config.server.port);

    let tmdb = TmdbClient::new(tmdb_api_key)
        .with_base_url(config.tmdb.base_url.as_str())
        .with_image_base_url(config.tmdb.image_base_url.as_str())
        .with_recent_window(config.tmdb.recent_actor_window);

    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async move {
        let state = AppState::new(config, tmdb).context("invalid segment catalog")?;
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
            .await
            .with_context(|| format!("failed to bind port {port}"))?;
        let actual_port = listener.local_addr()?.port();

        println!("Pitch timer → http://localhost:{actual_port}");

        tokio::select! {
            res = pitch_server::serve_on(state, listener, !no_open) => res,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                Ok(())
            }
        }
    })
}
