use crate::domain::{AuthBackend, AuthError, AuthResult, Credentials, SignupForm, SignupProfile};

// Email signup use case with an injected backend.
pub struct EmailSignupUseCase<B> {
    pub backend: B,
}

impl<B> EmailSignupUseCase<B>
where
    B: AuthBackend,
{
    pub async fn execute(&self, form: SignupForm) -> Result<AuthResult, AuthError> {
        // Confirmation is checked here so a mismatch never reaches the network.
        if form.password != form.confirm_password {
            return Err(AuthError::validation("Passwords do not match"));
        }

        let profile = SignupProfile {
            credentials: Credentials {
                email: form.email,
                password: form.password,
            },
            name: form.name,
        };

        self.backend.signup_with_email(profile).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{RecordedCall, RecordingBackend, token_result};
    use std::sync::Arc;

    fn form(password: &str, confirm_password: &str) -> SignupForm {
        SignupForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        }
    }

    #[tokio::test]
    async fn when_passwords_match_then_backend_receives_profile_once() {
        let backend = Arc::new(RecordingBackend::new());
        let use_case = EmailSignupUseCase {
            backend: backend.clone(),
        };

        let result = use_case
            .execute(form("s3cret!", "s3cret!"))
            .await
            .expect("expected signup to succeed");

        assert_eq!(result, token_result());
        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            RecordedCall::Signup(profile) => {
                assert_eq!(profile.name, "Ada");
                assert_eq!(profile.credentials.email, "ada@example.com");
                assert_eq!(profile.credentials.password, "s3cret!");
            }
            other => panic!("unexpected call: {other:?}"),
        }
    }

    #[tokio::test]
    async fn when_passwords_differ_then_validation_error_and_no_backend_call() {
        let backend = Arc::new(RecordingBackend::new());
        let use_case = EmailSignupUseCase {
            backend: backend.clone(),
        };

        let result = use_case.execute(form("s3cret!", "s3cret?")).await;

        assert_eq!(
            result,
            Err(AuthError::Validation("Passwords do not match".to_string()))
        );
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn when_backend_rejects_then_service_error_is_returned_unchanged() {
        let rejection = AuthError::Service {
            status: 400,
            message: "Email already registered".to_string(),
        };
        let backend = Arc::new(RecordingBackend::new().with_outcome(Err(rejection.clone())));
        let use_case = EmailSignupUseCase { backend };

        let result = use_case.execute(form("pw", "pw")).await;

        assert_eq!(result, Err(rejection));
    }
}
