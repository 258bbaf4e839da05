//! # client
//!
//! Browser session client for the TerraNest API. Holds the persisted
//! session (user identity + bearer token), attaches the token to outbound
//! requests, and clears everything when the server answers `UNAUTHORIZED`.
//!
//! WASM-only code (`gloo-net` HTTP, `localStorage`) sits behind the
//! `hydrate` feature with native stubs, so session logic builds and tests
//! natively. View rendering lives elsewhere and consumes these modules.

pub mod net;
pub mod state;
