use thiserror::Error;

// Generic copy shown when the backend cannot be reached at all.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Unable to reach the authentication service";

/// Domain-level errors for the auth workflows.
///
/// Every failure a caller can see collapses into one of these, and each one
/// renders to a single user-displayable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    // Local precondition failed; nothing was sent.
    #[error("{0}")]
    Validation(String),
    // No response received.
    #[error("{0}")]
    Transport(String),
    // The service answered with a non-success status.
    #[error("{message}")]
    Service { status: u16, message: String },
    #[error("{0}")]
    Unknown(String),
    // Rejected by the single-flight guard.
    #[error("A sign-in attempt is already in progress")]
    InFlight,
}

impl AuthError {
    pub fn validation(message: impl Into<String>) -> Self {
        AuthError::Validation(message.into())
    }

    pub fn transport() -> Self {
        AuthError::Transport(TRANSPORT_FAILURE_MESSAGE.to_string())
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn http_status(&self) -> Option<u16> {
        match self {
            AuthError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}
