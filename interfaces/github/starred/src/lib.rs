//! Single-page access to `GET /users/{user}/starred`.

pub mod index;
