use axum::{routing::get, Router};
use reqwest::Client;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::endpoints::feed::index::{configured_user_handler, user_handler};
use crate::github::build_http_client;

/// Shared by every request. Nothing fetched from GitHub is kept here.
#[derive(Debug, Clone)]
pub struct AppState {
    pub http: Client,
    pub api_base_url: String,
    pub user: Option<String>,
    pub access_token: Option<String>,
    pub public_url: Option<String>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: build_http_client(config.request_timeout())?,
            api_base_url: config.github_api_url.clone(),
            user: config.user.clone(),
            access_token: config.access_token.clone(),
            public_url: config.public_url.clone(),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/feed", get(configured_user_handler))
        .route("/feed/{user}", get(user_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
