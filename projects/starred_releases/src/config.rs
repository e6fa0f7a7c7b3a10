//! Service configuration from flags, falling back to environment variables.
//!
//! A `.env` file in the working directory is loaded before parsing.
//!
//! - `FEED_USER` - user whose stars back `GET /feed`
//! - `FEED_TOKEN` - GitHub access token used when a request carries none
//! - `FEED_HTTP` - bind address (default: `0.0.0.0:8080`, `:port` accepted)
//! - `FEED_PUBLIC_URL` - external base URL used for feed identifiers
//! - `GITHUB_API_URL` - GitHub REST API root
//! - `FEED_REQUEST_TIMEOUT` - per-request upstream timeout in seconds (default: none)
//! - `LOG_LEVEL` / `LOG_FORMAT` - `RUST_LOG` still takes precedence over `LOG_LEVEL`

use std::time::Duration;

use clap::Parser;
use utils_trace::LogFormat;

use crate::github::DEFAULT_API_URL;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "starred-releases",
    version,
    about = "Serves an Atom feed of releases from a user's starred GitHub repositories"
)]
pub struct Config {
    /// The username to fetch the feed for
    #[arg(long, env = "FEED_USER")]
    pub user: Option<String>,

    /// Your personal access token for GitHub
    #[arg(long = "access-token", env = "FEED_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// The address to bind the server to
    #[arg(long = "http", env = "FEED_HTTP", default_value = "0.0.0.0:8080")]
    pub http: String,

    /// Public base URL of this service, e.g. https://feeds.example.com
    #[arg(long, env = "FEED_PUBLIC_URL")]
    pub public_url: Option<String>,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub github_api_url: String,

    /// Upstream request timeout in seconds
    #[arg(long, env = "FEED_REQUEST_TIMEOUT")]
    pub request_timeout: Option<u64>,

    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// compact or json
    #[arg(long, env = "LOG_FORMAT", default_value = "compact")]
    pub log_format: LogFormat,
}

impl Config {
    /// Bind address; a bare `:port` listens on all interfaces.
    pub fn listen_addr(&self) -> String {
        if self.http.starts_with(':') {
            format!("0.0.0.0{}", self.http)
        } else {
            self.http.clone()
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout.map(Duration::from_secs)
    }
}
