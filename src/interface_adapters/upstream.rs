//! Shared request/response normalization for the external auth backend.
//!
//! Both the in-process [`HttpAuthBackend`](crate::interface_adapters::clients::HttpAuthBackend)
//! and the proxy handlers go through [`UpstreamClient::post_json`], so error
//! extraction lives in exactly one place.

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::domain::{AuthError, AuthResult};
use crate::interface_adapters::protocol::UpstreamErrorBody;

#[derive(Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: String,
}

// What came back from one upstream call that did produce a response.
#[derive(Debug)]
pub enum UpstreamOutcome {
    Success { status: StatusCode, body: Value },
    Rejected { status: StatusCode, body: Vec<u8> },
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream transport error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("upstream success body was not json: {0}")]
    Decode(#[source] serde_json::Error),
}

impl From<UpstreamError> for AuthError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Transport(_) => AuthError::transport(),
            UpstreamError::Decode(_) => AuthError::Unknown(
                "Unexpected response from the authentication service".to_string(),
            ),
        }
    }
}

impl UpstreamClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    // One POST, no retries. Non-success statuses are returned, not raised.
    pub async fn post_json<T>(&self, path: &str, body: &T) -> Result<UpstreamOutcome, UpstreamError>
    where
        T: Serialize + ?Sized,
    {
        let url = self.url(path);
        let res = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(UpstreamError::Transport)?;
        let status = res.status();
        let bytes = res.bytes().await.map_err(UpstreamError::Transport)?;

        tracing::debug!(%url, status = status.as_u16(), "upstream responded.");

        if !status.is_success() {
            return Ok(UpstreamOutcome::Rejected {
                status,
                body: bytes.to_vec(),
            });
        }

        let body = serde_json::from_slice(&bytes).map_err(UpstreamError::Decode)?;
        Ok(UpstreamOutcome::Success { status, body })
    }
}

/// Pulls a user-facing message out of a rejection body.
///
/// An unparsable body is treated as an empty object, so the default is used.
pub fn extract_error_message(body: &[u8], default: &str) -> String {
    let parsed: UpstreamErrorBody = serde_json::from_slice(body).unwrap_or_default();
    parsed.message().unwrap_or_else(|| default.to_string())
}

impl UpstreamOutcome {
    pub fn status(&self) -> StatusCode {
        match self {
            UpstreamOutcome::Success { status, .. } | UpstreamOutcome::Rejected { status, .. } => {
                *status
            }
        }
    }

    // Rejections read `detail`/`error` from the body, falling back to `default_message`.
    pub fn into_auth_result<F>(self, default_message: F) -> Result<AuthResult, AuthError>
    where
        F: FnOnce(StatusCode) -> String,
    {
        match self {
            UpstreamOutcome::Success { body, .. } => Ok(AuthResult(body)),
            UpstreamOutcome::Rejected { status, body } => Err(AuthError::Service {
                status: status.as_u16(),
                message: extract_error_message(&body, &default_message(status)),
            }),
        }
    }

    // For routes without an error-body contract: the body is ignored.
    pub fn into_auth_result_generic(self, message: &str) -> Result<AuthResult, AuthError> {
        match self {
            UpstreamOutcome::Success { body, .. } => Ok(AuthResult(body)),
            UpstreamOutcome::Rejected { status, .. } => Err(AuthError::Service {
                status: status.as_u16(),
                message: message.to_string(),
            }),
        }
    }
}
