//! Composition root for the client-side session workflow.
//!
//! The rendering surface calls [`session_workflow`] once per page session,
//! passing its own sign-in popup as the [`SignInPrompt`]. Everything else is
//! built here from configuration and dropped with the returned workflow.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::domain::SignInPrompt;
use crate::frameworks::config;
use crate::interface_adapters::clients::HttpAuthBackend;
use crate::interface_adapters::identity::{FirebaseConfig, FirebaseIdentityProvider};
use crate::interface_adapters::upstream::UpstreamClient;
use crate::use_cases::session::SessionWorkflow;

#[derive(Debug, Error)]
pub enum WiringError {
    #[error("FIREBASE_API_KEY must be set to enable social sign-in")]
    MissingFirebaseConfig,
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}

pub struct WorkflowSettings {
    pub backend_url: String,
    pub timeout: Duration,
    pub destination: String,
    pub firebase: FirebaseConfig,
}

impl WorkflowSettings {
    pub fn from_env() -> Result<Self, WiringError> {
        let firebase = config::firebase_config().ok_or(WiringError::MissingFirebaseConfig)?;
        Ok(Self {
            backend_url: config::backend_url(),
            timeout: config::backend_timeout(),
            destination: config::auth_redirect(),
            firebase,
        })
    }
}

pub fn session_workflow(prompt: Arc<dyn SignInPrompt>) -> Result<SessionWorkflow, WiringError> {
    session_workflow_with(WorkflowSettings::from_env()?, prompt)
}

pub fn session_workflow_with(
    settings: WorkflowSettings,
    prompt: Arc<dyn SignInPrompt>,
) -> Result<SessionWorkflow, WiringError> {
    let upstream = UpstreamClient::new(settings.backend_url, settings.timeout)?;
    let backend = Arc::new(HttpAuthBackend::new(upstream));
    let identity = Arc::new(FirebaseIdentityProvider::new(
        settings.firebase,
        prompt,
        settings.timeout,
    )?);

    Ok(SessionWorkflow::new(backend, identity).with_destination(settings.destination))
}
