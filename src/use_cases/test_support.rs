use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Notify;

use crate::domain::{
    AuthBackend, AuthError, AuthResult, Credentials, IdentityProvider, SignupProfile,
    SocialAssertion, SocialFlow, SocialIdentity, TokenSource,
};

// One backend invocation as observed by the fake.
#[derive(Clone, Debug)]
pub(crate) enum RecordedCall {
    Signup(SignupProfile),
    Login(Credentials),
    Social(SocialAssertion, SocialFlow),
    SocialLogin(SocialAssertion),
}

pub(crate) fn token_result() -> AuthResult {
    AuthResult(json!({"access_token": "backend-token", "token_type": "bearer"}))
}

// Backend fake that records every call and replays scripted outcomes.
#[derive(Default)]
pub(crate) struct RecordingBackend {
    calls: Mutex<Vec<RecordedCall>>,
    outcomes: Mutex<VecDeque<Result<AuthResult, AuthError>>>,
    // When set, each call signals `entered` and parks until `release` fires.
    gate: Option<Gate>,
}

#[derive(Clone, Default)]
pub(crate) struct Gate {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl RecordingBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_outcome(self, outcome: Result<AuthResult, AuthError>) -> Self {
        self.outcomes
            .lock()
            .expect("outcomes mutex poisoned")
            .push_back(outcome);
        self
    }

    pub(crate) fn with_gate(mut self, gate: Gate) -> Self {
        self.gate = Some(gate);
        self
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    async fn record(&self, call: RecordedCall) -> Result<AuthResult, AuthError> {
        self.calls.lock().expect("calls mutex poisoned").push(call);

        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        self.outcomes
            .lock()
            .expect("outcomes mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok(token_result()))
    }
}

#[async_trait]
impl AuthBackend for RecordingBackend {
    async fn signup_with_email(&self, profile: SignupProfile) -> Result<AuthResult, AuthError> {
        self.record(RecordedCall::Signup(profile)).await
    }

    async fn login_with_email(&self, credentials: Credentials) -> Result<AuthResult, AuthError> {
        self.record(RecordedCall::Login(credentials)).await
    }

    async fn exchange_social_assertion(
        &self,
        assertion: SocialAssertion,
        flow: SocialFlow,
    ) -> Result<AuthResult, AuthError> {
        self.record(RecordedCall::Social(assertion, flow)).await
    }

    async fn social_login(&self, assertion: SocialAssertion) -> Result<AuthResult, AuthError> {
        self.record(RecordedCall::SocialLogin(assertion)).await
    }
}

// Token source that mints "fresh-token-N" and counts how often it was asked.
#[derive(Default)]
pub(crate) struct CountingTokens {
    pub issued: AtomicUsize,
}

#[async_trait]
impl TokenSource for CountingTokens {
    async fn fresh_token(&self) -> Result<String, AuthError> {
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("fresh-token-{n}"))
    }
}

// Identity provider fake with a fixed profile, or a scripted failure.
pub(crate) struct FakeIdentityProvider {
    pub email: String,
    pub display_name: String,
    pub tokens: Arc<CountingTokens>,
    pub failure: Option<AuthError>,
}

impl FakeIdentityProvider {
    pub(crate) fn signed_in(email: &str, display_name: &str) -> Self {
        Self {
            email: email.to_string(),
            display_name: display_name.to_string(),
            tokens: Arc::new(CountingTokens::default()),
            failure: None,
        }
    }

    pub(crate) fn failing(err: AuthError) -> Self {
        Self {
            failure: Some(err),
            ..Self::signed_in("", "")
        }
    }

    pub(crate) fn tokens_issued(&self) -> usize {
        self.tokens.issued.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn acquire_identity(&self) -> Result<SocialIdentity, AuthError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        Ok(SocialIdentity::new(
            self.email.clone(),
            self.display_name.clone(),
            self.tokens.clone(),
        ))
    }
}
