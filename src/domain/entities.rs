use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::domain::ports::TokenSource;

// Email/password pair; lives only for the duration of one submit.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

// Credentials plus the display name sent to the backend on signup.
#[derive(Clone, Debug)]
pub struct SignupProfile {
    pub credentials: Credentials,
    pub name: String,
}

// Raw signup form as typed by the user, before the confirmation check.
#[derive(Clone)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

// Which backend exchange a social sign-in feeds into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SocialFlow {
    Signup,
    Login,
}

impl SocialFlow {
    // The backend spells the provider differently per route.
    pub fn provider_name(self) -> &'static str {
        match self {
            SocialFlow::Signup => "google",
            SocialFlow::Login => "Google",
        }
    }
}

// Identity proof forwarded to the backend. The token must be freshly minted.
#[derive(Clone)]
pub struct SocialAssertion {
    pub provider: String,
    pub token: String,
    pub email: String,
    pub name: String,
}

impl fmt::Debug for SocialAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SocialAssertion")
            .field("provider", &self.provider)
            .field("email", &self.email)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Identity returned by a provider sign-in.
///
/// Holds the profile fields plus a handle that can mint new ID tokens, so
/// callers never reuse the token issued during the sign-in itself.
#[derive(Clone)]
pub struct SocialIdentity {
    pub email: String,
    pub display_name: String,
    tokens: Arc<dyn TokenSource>,
}

impl SocialIdentity {
    pub fn new(
        email: impl Into<String>,
        display_name: impl Into<String>,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            email: email.into(),
            display_name: display_name.into(),
            tokens,
        }
    }

    pub async fn fresh_token(&self) -> Result<String, crate::domain::AuthError> {
        self.tokens.fresh_token().await
    }
}

impl fmt::Debug for SocialIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SocialIdentity")
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .finish_non_exhaustive()
    }
}

/// Success payload from the backend, passed through untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthResult(pub Value);

impl AuthResult {
    pub fn into_inner(self) -> Value {
        self.0
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    // The backend issues bearer tokens; other shapes simply yield None.
    pub fn access_token(&self) -> Option<&str> {
        self.0.get("access_token").and_then(Value::as_str)
    }

    pub fn token_type(&self) -> Option<&str> {
        self.0.get("token_type").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn when_result_carries_bearer_token_then_accessors_expose_it() {
        let result = AuthResult(json!({"access_token": "abc", "token_type": "bearer"}));

        assert_eq!(result.access_token(), Some("abc"));
        assert_eq!(result.token_type(), Some("bearer"));
    }

    #[test]
    fn when_result_has_unexpected_shape_then_accessors_return_none() {
        let result = AuthResult(json!(["not", "an", "object"]));

        assert_eq!(result.access_token(), None);
        assert_eq!(result.token_type(), None);
    }

    #[test]
    fn when_credentials_are_debug_printed_then_password_is_redacted() {
        let credentials = Credentials {
            email: "pilot@example.com".to_string(),
            password: "hunter2".to_string(),
        };

        let printed = format!("{credentials:?}");
        assert!(printed.contains("pilot@example.com"));
        assert!(!printed.contains("hunter2"));
    }
}
