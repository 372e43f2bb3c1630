use async_trait::async_trait;

use crate::domain::entities::{
    AuthResult, Credentials, SignupProfile, SocialAssertion, SocialFlow, SocialIdentity,
};
use crate::domain::errors::AuthError;

// Port for the external authentication backend.
// Use cases depend on this trait, not on the reqwest client.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn signup_with_email(&self, profile: SignupProfile) -> Result<AuthResult, AuthError>;

    async fn login_with_email(&self, credentials: Credentials) -> Result<AuthResult, AuthError>;

    async fn exchange_social_assertion(
        &self,
        assertion: SocialAssertion,
        flow: SocialFlow,
    ) -> Result<AuthResult, AuthError>;

    async fn social_login(&self, assertion: SocialAssertion) -> Result<AuthResult, AuthError>;
}

// Port for a third-party identity provider sign-in.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn acquire_identity(&self) -> Result<SocialIdentity, AuthError>;
}

// Mints a new ID token on every call; implementations must not hand back a cached one.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn fresh_token(&self) -> Result<String, AuthError>;
}

// Interactive half of the provider sign-in, owned by the rendering surface.
// Yields the provider's OAuth ID token, or None when the user cancels.
#[async_trait]
pub trait SignInPrompt: Send + Sync {
    async fn prompt(&self) -> Result<Option<String>, AuthError>;
}

// Shared handles forward to the inner adapter so use cases can stay generic.
#[async_trait]
impl<T> AuthBackend for std::sync::Arc<T>
where
    T: AuthBackend + ?Sized,
{
    async fn signup_with_email(&self, profile: SignupProfile) -> Result<AuthResult, AuthError> {
        (**self).signup_with_email(profile).await
    }

    async fn login_with_email(&self, credentials: Credentials) -> Result<AuthResult, AuthError> {
        (**self).login_with_email(credentials).await
    }

    async fn exchange_social_assertion(
        &self,
        assertion: SocialAssertion,
        flow: SocialFlow,
    ) -> Result<AuthResult, AuthError> {
        (**self).exchange_social_assertion(assertion, flow).await
    }

    async fn social_login(&self, assertion: SocialAssertion) -> Result<AuthResult, AuthError> {
        (**self).social_login(assertion).await
    }
}

#[async_trait]
impl<T> IdentityProvider for std::sync::Arc<T>
where
    T: IdentityProvider + ?Sized,
{
    async fn acquire_identity(&self) -> Result<SocialIdentity, AuthError> {
        (**self).acquire_identity().await
    }
}
