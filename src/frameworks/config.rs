use std::{env, time::Duration};

use crate::interface_adapters::identity::{DEFAULT_IDENTITY_URL, DEFAULT_TOKEN_URL, FirebaseConfig};
use crate::use_cases::session::DEFAULT_DESTINATION;

// Runtime settings, read from the environment (optionally seeded from .env).

pub fn http_port() -> u16 {
    env::var("MIRROR_HTTP_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000)
}

pub fn backend_url() -> String {
    env::var("MIRROR_BACKEND_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

pub fn backend_timeout() -> Duration {
    let millis = env::var("MIRROR_BACKEND_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(10_000);
    Duration::from_millis(millis)
}

pub fn auth_redirect() -> String {
    env::var("MIRROR_AUTH_REDIRECT").unwrap_or_else(|_| DEFAULT_DESTINATION.to_string())
}

pub fn firebase_config() -> Option<FirebaseConfig> {
    firebase_config_from(|key| env::var(key).ok())
}

// Split out so the lookup can be faked without touching process env.
pub fn firebase_config_from<F>(lookup: F) -> Option<FirebaseConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = lookup("FIREBASE_API_KEY").filter(|key| !key.trim().is_empty())?;

    Some(FirebaseConfig {
        api_key,
        identity_base_url: lookup("FIREBASE_IDENTITY_URL")
            .unwrap_or_else(|| DEFAULT_IDENTITY_URL.to_string()),
        token_base_url: lookup("FIREBASE_TOKEN_URL")
            .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
        request_uri: lookup("FIREBASE_REQUEST_URI")
            .unwrap_or_else(|| "http://localhost".to_string()),
    })
}
