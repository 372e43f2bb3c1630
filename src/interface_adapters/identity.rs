//! Firebase-backed identity provider.
//!
//! The popup half of a Google sign-in runs in the rendering surface and is
//! reached through [`SignInPrompt`]. This adapter exchanges the resulting
//! Google credential with Firebase, then mints Firebase ID tokens on demand
//! from the refresh token it received. Nothing here is process-global: build
//! a provider per session and drop it when the session ends.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

use crate::domain::{AuthError, IdentityProvider, SignInPrompt, SocialIdentity, TokenSource};

pub const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com";
pub const DEFAULT_TOKEN_URL: &str = "https://securetoken.googleapis.com";

const SIGN_IN_WITH_IDP_PATH: &str = "/v1/accounts:signInWithIdp";
const TOKEN_PATH: &str = "/v1/token";
const GOOGLE_PROVIDER_ID: &str = "google.com";

#[derive(Clone, Debug)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub identity_base_url: String,
    pub token_base_url: String,
    // Redirect URI Firebase checks the IdP credential against.
    pub request_uri: String,
}

impl FirebaseConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            identity_base_url: DEFAULT_IDENTITY_URL.to_string(),
            token_base_url: DEFAULT_TOKEN_URL.to_string(),
            request_uri: "http://localhost".to_string(),
        }
    }

    fn endpoint(&self, base: &str, path: &str) -> Result<Url, AuthError> {
        Url::parse_with_params(
            &format!("{}{}", base.trim_end_matches('/'), path),
            &[("key", self.api_key.as_str())],
        )
        .map_err(|e| {
            tracing::error!(error = %e, "invalid identity provider endpoint.");
            AuthError::Unknown("Identity provider is misconfigured".to_string())
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInWithIdpRequest<'a> {
    post_body: String,
    request_uri: &'a str,
    return_secure_token: bool,
    return_idp_credential: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInWithIdpResponse {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    refresh_token: String,
}

#[derive(Serialize)]
struct RefreshTokenRequest<'a> {
    grant_type: &'static str,
    refresh_token: &'a str,
}

#[derive(Deserialize)]
struct RefreshTokenResponse {
    id_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Default, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    error: Option<ProviderErrorDetail>,
}

#[derive(Deserialize)]
struct ProviderErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

pub struct FirebaseIdentityProvider {
    http: Client,
    config: Arc<FirebaseConfig>,
    prompt: Arc<dyn SignInPrompt>,
}

impl FirebaseIdentityProvider {
    pub fn new(
        config: FirebaseConfig,
        prompt: Arc<dyn SignInPrompt>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            config: Arc::new(config),
            prompt,
        })
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityProvider {
    #[tracing::instrument(name = "identity_sign_in", skip_all)]
    async fn acquire_identity(&self) -> Result<SocialIdentity, AuthError> {
        let Some(google_id_token) = self.prompt.prompt().await? else {
            tracing::info!("sign-in cancelled by user.");
            return Err(AuthError::validation("Sign-in was cancelled"));
        };

        let post_body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("id_token", &google_id_token)
            .append_pair("providerId", GOOGLE_PROVIDER_ID)
            .finish();
        let req = SignInWithIdpRequest {
            post_body,
            request_uri: &self.config.request_uri,
            return_secure_token: true,
            return_idp_credential: true,
        };
        let url = self
            .config
            .endpoint(&self.config.identity_base_url, SIGN_IN_WITH_IDP_PATH)?;

        let res: SignInWithIdpResponse = post_provider(&self.http, url, &req).await?;
        tracing::info!("identity provider sign-in succeeded.");

        let tokens = FirebaseTokenSource {
            http: self.http.clone(),
            config: self.config.clone(),
            refresh_token: Mutex::new(res.refresh_token),
        };

        Ok(SocialIdentity::new(
            res.email.unwrap_or_default(),
            res.display_name.unwrap_or_default(),
            Arc::new(tokens),
        ))
    }
}

// Mints ID tokens from a refresh token. Rotated refresh tokens replace the old one.
struct FirebaseTokenSource {
    http: Client,
    config: Arc<FirebaseConfig>,
    refresh_token: Mutex<String>,
}

#[async_trait]
impl TokenSource for FirebaseTokenSource {
    #[tracing::instrument(name = "identity_fresh_token", skip_all)]
    async fn fresh_token(&self) -> Result<String, AuthError> {
        let refresh_token = self
            .refresh_token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        let req = RefreshTokenRequest {
            grant_type: "refresh_token",
            refresh_token: &refresh_token,
        };
        let url = self
            .config
            .endpoint(&self.config.token_base_url, TOKEN_PATH)?;

        let res: RefreshTokenResponse = post_provider(&self.http, url, &req).await?;

        if let Some(rotated) = res.refresh_token {
            *self
                .refresh_token
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()) = rotated;
        }

        Ok(res.id_token)
    }
}

async fn post_provider<Req, Res>(http: &Client, url: Url, req: &Req) -> Result<Res, AuthError>
where
    Req: Serialize + ?Sized,
    Res: for<'de> Deserialize<'de>,
{
    let res = http.post(url).json(req).send().await.map_err(|e| {
        tracing::error!(error = %e, "identity provider unreachable.");
        AuthError::Transport("Unable to reach the identity provider".to_string())
    })?;
    let status = res.status();

    if !status.is_success() {
        let body: ProviderErrorBody = res.json().await.unwrap_or_default();
        let reason = body
            .error
            .and_then(|detail| detail.message)
            .unwrap_or_else(|| "unknown error".to_string());
        tracing::warn!(status = status.as_u16(), %reason, "identity provider rejected request.");
        return Err(AuthError::Service {
            status: status.as_u16(),
            message: format!("Identity provider sign-in failed: {reason}"),
        });
    }

    res.json::<Res>().await.map_err(|e| {
        tracing::error!(error = %e, "identity provider response decode failed.");
        AuthError::Unknown("Unexpected response from the identity provider".to_string())
    })
}
