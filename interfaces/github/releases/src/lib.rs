//! Single-page access to `GET /repos/{owner}/{repo}/releases`.

pub mod index;
