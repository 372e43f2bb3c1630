use crate::domain::{
    AuthBackend, AuthError, AuthResult, Credentials, SignupProfile, SocialAssertion, SocialFlow,
};
use crate::interface_adapters::protocol::{
    GoogleSignupRequest, LoginRequest, SignupRequest, SocialAuthRequest, SocialLoginRequest,
};
use crate::interface_adapters::upstream::UpstreamClient;
use async_trait::async_trait;

pub const SIGNUP_PATH: &str = "/auth/signup";
pub const LOGIN_PATH: &str = "/auth/login";
pub const GOOGLE_SIGNUP_PATH: &str = "/auth/google-signup";
pub const SOCIAL_AUTH_PATH: &str = "/auth/social-auth";
pub const SOCIAL_LOGIN_PATH: &str = "/auth/social-login";

// Backend client used by the session workflow. Thin wrapper over the shared upstream client.
#[derive(Clone)]
pub struct HttpAuthBackend {
    upstream: UpstreamClient,
}

impl HttpAuthBackend {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    #[tracing::instrument(name = "backend_signup", skip_all, fields(email = %profile.credentials.email))]
    async fn signup_with_email(&self, profile: SignupProfile) -> Result<AuthResult, AuthError> {
        let req = SignupRequest {
            email: &profile.credentials.email,
            password: &profile.credentials.password,
            name: &profile.name,
        };
        let outcome = self
            .upstream
            .post_json(SIGNUP_PATH, &req)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "signup request failed."))?;

        outcome.into_auth_result(|_| "Signup failed".to_string())
    }

    #[tracing::instrument(name = "backend_login", skip_all, fields(email = %credentials.email))]
    async fn login_with_email(&self, credentials: Credentials) -> Result<AuthResult, AuthError> {
        let req = LoginRequest {
            email: &credentials.email,
            password: &credentials.password,
        };
        let outcome = self
            .upstream
            .post_json(LOGIN_PATH, &req)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "login request failed."))?;

        outcome.into_auth_result(|_| "Login failed".to_string())
    }

    #[tracing::instrument(
        name = "backend_social_exchange",
        skip_all,
        fields(email = %assertion.email, flow = ?flow)
    )]
    async fn exchange_social_assertion(
        &self,
        assertion: SocialAssertion,
        flow: SocialFlow,
    ) -> Result<AuthResult, AuthError> {
        // Each flow has its own route and body shape on the backend.
        let outcome = match flow {
            SocialFlow::Signup => {
                let req = GoogleSignupRequest {
                    email: &assertion.email,
                    name: &assertion.name,
                    provider: &assertion.provider,
                    id_token: &assertion.token,
                };
                self.upstream.post_json(GOOGLE_SIGNUP_PATH, &req).await
            }
            SocialFlow::Login => {
                let req = SocialAuthRequest {
                    email: &assertion.email,
                    name: &assertion.name,
                    provider: &assertion.provider,
                    token: &assertion.token,
                };
                self.upstream.post_json(SOCIAL_AUTH_PATH, &req).await
            }
        }
        .inspect_err(|e| tracing::error!(error = %e, "social exchange request failed."))?;

        outcome.into_auth_result(|status| match flow {
            SocialFlow::Signup => "Google signup failed".to_string(),
            SocialFlow::Login => format!("Google login failed with status {}", status.as_u16()),
        })
    }

    #[tracing::instrument(name = "backend_social_login", skip_all, fields(email = %assertion.email))]
    async fn social_login(&self, assertion: SocialAssertion) -> Result<AuthResult, AuthError> {
        let req = SocialLoginRequest {
            provider: &assertion.provider,
            token: &assertion.token,
            email: &assertion.email,
            name: &assertion.name,
        };
        let outcome = self
            .upstream
            .post_json(SOCIAL_LOGIN_PATH, &req)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "social login request failed."))?;

        // This route has no error-body contract.
        outcome.into_auth_result_generic("Failed to authenticate with provider")
    }
}
