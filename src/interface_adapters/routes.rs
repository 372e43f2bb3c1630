use crate::interface_adapters::handlers::{signup, social_auth};
use crate::interface_adapters::state::AppState;
use axum::{Router, routing::post};
use std::sync::Arc;

pub fn app(state: Arc<AppState>) -> Router {
    // Wire the browser-facing proxy routes to their handlers.
    Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/social-auth", post(social_auth))
        .with_state(state)
}
