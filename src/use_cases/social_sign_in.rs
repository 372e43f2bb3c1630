use crate::domain::{
    AuthBackend, AuthError, AuthResult, IdentityProvider, SocialAssertion, SocialFlow,
};

// Social sign-in use case: provider identity in, backend session out.
pub struct SocialSignInUseCase<P, B> {
    pub provider: P,
    pub backend: B,
}

impl<P, B> SocialSignInUseCase<P, B>
where
    P: IdentityProvider,
    B: AuthBackend,
{
    pub async fn execute(&self, flow: SocialFlow) -> Result<AuthResult, AuthError> {
        let identity = self.provider.acquire_identity().await?;

        // The backend keys accounts by email; refuse before any network call.
        if identity.email.trim().is_empty() {
            return Err(AuthError::validation("No email provided"));
        }

        // Always mint a new token right before the exchange. The backend
        // rejects stale ID tokens.
        let token = identity.fresh_token().await?;

        let assertion = SocialAssertion {
            provider: flow.provider_name().to_string(),
            token,
            email: identity.email,
            name: identity.display_name,
        };

        self.backend.exchange_social_assertion(assertion, flow).await
    }
}
