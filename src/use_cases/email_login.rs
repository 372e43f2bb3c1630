use crate::domain::{AuthBackend, AuthError, AuthResult, Credentials};

// Email login use case with an injected backend.
pub struct EmailLoginUseCase<B> {
    pub backend: B,
}

impl<B> EmailLoginUseCase<B>
where
    B: AuthBackend,
{
    pub async fn execute(&self, credentials: Credentials) -> Result<AuthResult, AuthError> {
        self.backend.login_with_email(credentials).await
    }
}
