//! HTTP layer: wire DTOs and REST helpers for the auth endpoints.

pub mod api;
pub mod types;
