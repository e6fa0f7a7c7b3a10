//! Atom feed of releases from a GitHub user's starred repositories
//!
//! - Feed pipeline (pagination, fan-out, sanitizing, rendering) in `feed/`
//! - GitHub API seam in `github/`
//! - HTTP endpoints in `endpoints/`
//! - Nothing is stored: every request fetches from GitHub again

pub mod app;
pub mod config;
pub mod endpoints;
pub mod feed;
pub mod github;
