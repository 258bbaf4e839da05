//! Router assembly.
//!
//! Binds the auth gateway endpoints under the `/api/auth` prefix, the OAuth
//! browser flow under `/auth/{provider}`, and a health probe. Non-auth
//! resources (actions, challenges, posts, organizations) mount their own
//! routers here as they come online.

pub mod auth;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/register", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        .route("/auth/{provider}", get(auth::oauth_redirect))
        .route("/auth/{provider}/callback", get(auth::oauth_callback))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
