use serde::{Deserialize, Serialize};
use serde_json::Value;

// Payloads sent to the backend. Field names match its JSON contract.

#[derive(Debug, Serialize)]
pub struct SignupRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct GoogleSignupRequest<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub provider: &'a str,
    #[serde(rename = "idToken")]
    pub id_token: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SocialAuthRequest<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub provider: &'a str,
    pub token: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SocialLoginRequest<'a> {
    pub provider: &'a str,
    pub token: &'a str,
    pub email: &'a str,
    pub name: &'a str,
}

/// Error body the backend returns on rejection.
///
/// Both fields are optional and may hold any JSON; validation failures put a
/// list under `detail`.
#[derive(Debug, Default, Deserialize)]
pub struct UpstreamErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl UpstreamErrorBody {
    // `detail` wins over `error`; empty strings and nulls count as absent.
    pub fn message(&self) -> Option<String> {
        [&self.detail, &self.error]
            .into_iter()
            .flatten()
            .find_map(render_message)
    }
}

fn render_message(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(false) => None,
        other => Some(other.to_string()),
    }
}

// Error envelope returned by the proxy endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
