use crate::interface_adapters::clients::{SIGNUP_PATH, SOCIAL_LOGIN_PATH};
use crate::interface_adapters::protocol::ErrorResponse;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::upstream::{UpstreamOutcome, extract_error_message};
use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use serde_json::Value;
use std::sync::Arc;

type ProxyResult = Result<(StatusCode, Json<Value>), (StatusCode, Json<ErrorResponse>)>;

// How a proxy route words upstream rejections.
#[derive(Clone, Copy)]
enum RejectionMessage {
    // Read `detail`/`error` from the body, else use the fallback.
    FromBody(&'static str),
    // Route has no error-body contract.
    Fixed(&'static str),
}

// Relays a browser signup to the backend.
#[tracing::instrument(name = "proxy_signup", skip_all)]
pub async fn signup(State(state): State<Arc<AppState>>, body: Bytes) -> ProxyResult {
    relay(
        &state,
        SIGNUP_PATH,
        &body,
        RejectionMessage::FromBody("Signup failed"),
    )
    .await
}

// Relays a browser social sign-in to the backend's social-login route.
#[tracing::instrument(name = "proxy_social_auth", skip_all)]
pub async fn social_auth(State(state): State<Arc<AppState>>, body: Bytes) -> ProxyResult {
    relay(
        &state,
        SOCIAL_LOGIN_PATH,
        &body,
        RejectionMessage::Fixed("Authentication failed"),
    )
    .await
}

async fn relay(
    state: &AppState,
    path: &str,
    body: &[u8],
    rejection: RejectionMessage,
) -> ProxyResult {
    // The body is forwarded as-is; parsing only checks that it is JSON.
    let payload: Value = serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(error = %e, "proxy request body is not json.");
        internal_error()
    })?;

    let outcome = state.upstream.post_json(path, &payload).await.map_err(|e| {
        tracing::error!(error = %e, path, "proxy upstream call failed.");
        internal_error()
    })?;

    let status = outcome.status();
    tracing::debug!(path, status = status.as_u16(), "proxy relaying upstream response.");

    match outcome {
        UpstreamOutcome::Success { body, .. } => Ok((status, Json(body))),
        UpstreamOutcome::Rejected { body, .. } => {
            let message = match rejection {
                RejectionMessage::FromBody(fallback) => extract_error_message(&body, fallback),
                RejectionMessage::Fixed(message) => message.to_string(),
            };
            tracing::warn!(path, status = status.as_u16(), %message, "proxy relayed rejection.");
            Err(error_response(status, &message))
        }
    }
}

fn internal_error() -> (StatusCode, Json<ErrorResponse>) {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

// Helper to build a JSON error response.
fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}
