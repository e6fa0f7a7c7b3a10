use clap::Parser;
use projects_starred_releases::{
    app::{router, AppState},
    config::Config,
};
use thiserror::Error;
use tracing::{info, warn};
use utils_trace::tracing_init;

#[derive(Debug, Error)]
pub enum MainError {
    #[error("TracingInit: {source}")]
    TracingInit {
        #[source]
        source: utils_trace::TracingInitError,
    },
    #[error("HttpClientBuild: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },
    #[error("TcpListenerBind: {source}")]
    TcpListenerBind {
        #[source]
        source: std::io::Error,
    },
    #[error("Serve: {source}")]
    Serve {
        #[source]
        source: std::io::Error,
    },
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
    dotenvy::dotenv().ok();

    let config = Config::parse();

    tracing_init(&config.log_level, config.log_format)
        .map_err(|source| MainError::TracingInit { source })?;

    if config.user.is_none() {
        warn!("no user configured, only /feed/{{user}} will serve feeds");
    }
    if config.access_token.is_none() {
        warn!("no access token configured, requests must pass access_token");
    }

    let state = AppState::from_config(&config)
        .map_err(|source| MainError::HttpClientBuild { source })?;

    let app = router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| MainError::TcpListenerBind { source })?;

    info!("Server running on addr: {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|source| MainError::Serve { source })?;

    Ok(())
}
