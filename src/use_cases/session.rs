//! Session workflow orchestration.
//!
//! A [`SessionWorkflow`] owns the submit state of one page session. It picks
//! the email or social path, tracks `Idle -> Submitting -> Success | Failed`,
//! and hands back the destination to navigate to after a successful sign-in.
//! At most one attempt is outstanding at a time; a submit that arrives while
//! another is running is rejected with [`AuthError::InFlight`]. Dropping a
//! submit future before it settles marks that attempt cancelled and frees
//! the slot.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::Instrument;
use uuid::Uuid;

use crate::domain::{
    AuthBackend, AuthError, AuthResult, Credentials, IdentityProvider, SignupForm, SocialFlow,
};
use crate::use_cases::email_login::EmailLoginUseCase;
use crate::use_cases::email_signup::EmailSignupUseCase;
use crate::use_cases::social_sign_in::SocialSignInUseCase;

pub const DEFAULT_DESTINATION: &str = "/dashboard";
pub const CANCELLED_MESSAGE: &str = "Sign-in was cancelled";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Submitting { attempt_id: Uuid },
    Success { destination: String },
    Failed { message: String },
}

// What the caller gets back after a successful attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionOutcome {
    pub destination: String,
    pub result: AuthResult,
}

pub struct SessionWorkflow {
    backend: Arc<dyn AuthBackend>,
    identity: Arc<dyn IdentityProvider>,
    destination: String,
    state: Mutex<SessionState>,
}

impl SessionWorkflow {
    pub fn new(backend: Arc<dyn AuthBackend>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            backend,
            identity,
            destination: DEFAULT_DESTINATION.to_string(),
            state: Mutex::new(SessionState::Idle),
        }
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = destination.into();
        self
    }

    pub fn state(&self) -> SessionState {
        self.lock_state().clone()
    }

    // Advisory only; the single-flight guard is what actually rejects duplicates.
    pub fn is_loading(&self) -> bool {
        matches!(*self.lock_state(), SessionState::Submitting { .. })
    }

    pub async fn submit_signup(&self, form: SignupForm) -> Result<SessionOutcome, AuthError> {
        let use_case = EmailSignupUseCase {
            backend: self.backend.clone(),
        };
        self.run("email_signup", use_case.execute(form)).await
    }

    pub async fn submit_login(
        &self,
        credentials: Credentials,
    ) -> Result<SessionOutcome, AuthError> {
        let use_case = EmailLoginUseCase {
            backend: self.backend.clone(),
        };
        self.run("email_login", use_case.execute(credentials)).await
    }

    pub async fn submit_social(&self, flow: SocialFlow) -> Result<SessionOutcome, AuthError> {
        let use_case = SocialSignInUseCase {
            provider: self.identity.clone(),
            backend: self.backend.clone(),
        };
        let operation = match flow {
            SocialFlow::Signup => "social_signup",
            SocialFlow::Login => "social_login",
        };
        self.run(operation, use_case.execute(flow)).await
    }

    async fn run<F>(&self, operation: &'static str, attempt: F) -> Result<SessionOutcome, AuthError>
    where
        F: Future<Output = Result<AuthResult, AuthError>>,
    {
        let guard = self.begin()?;
        let span = tracing::info_span!("session_attempt", attempt_id = %guard.attempt_id, operation);

        let result = attempt.instrument(span.clone()).await;
        let _entered = span.enter();

        // Settled normally; the guard must not overwrite the outcome.
        guard.disarm();
        let mut state = self.lock_state();
        match result {
            Ok(result) => {
                tracing::info!(destination = %self.destination, "sign-in succeeded.");
                *state = SessionState::Success {
                    destination: self.destination.clone(),
                };
                Ok(SessionOutcome {
                    destination: self.destination.clone(),
                    result,
                })
            }
            Err(err) => {
                tracing::warn!(error = %err, status = ?err.http_status(), "sign-in failed.");
                *state = SessionState::Failed {
                    message: err.message(),
                };
                Err(err)
            }
        }
    }

    // Single-flight guard: claim the Submitting slot or reject.
    fn begin(&self) -> Result<AttemptGuard<'_>, AuthError> {
        let mut state = self.lock_state();
        if let SessionState::Submitting { attempt_id } = *state {
            tracing::warn!(%attempt_id, "rejected duplicate submit while in flight.");
            return Err(AuthError::InFlight);
        }

        let attempt_id = Uuid::new_v4();
        *state = SessionState::Submitting { attempt_id };
        Ok(AttemptGuard {
            state: &self.state,
            attempt_id,
            armed: true,
        })
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        // A poisoned lock only means a panic elsewhere; the state value is still usable.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// Releases the Submitting slot if the submit future is dropped before it settles.
struct AttemptGuard<'a> {
    state: &'a Mutex<SessionState>,
    attempt_id: Uuid,
    armed: bool,
}

impl AttemptGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if *state == (SessionState::Submitting { attempt_id: self.attempt_id }) {
            tracing::warn!(attempt_id = %self.attempt_id, "sign-in attempt cancelled.");
            *state = SessionState::Failed {
                message: CANCELLED_MESSAGE.to_string(),
            };
        }
    }
}
