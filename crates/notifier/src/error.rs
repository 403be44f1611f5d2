use thiserror::Error;

use relay_secrets::SecretError;

/// Failures that stop a notification before or instead of delivery.
#[derive(Debug, Error)]
pub enum NotifierError {
    /// Credential resolution failed. Fatal to the invocation.
    #[error(transparent)]
    Credentials(#[from] SecretError),

    #[error("Attempt budget must be greater than zero, got {0}")]
    InvalidAttemptBudget(u32),

    #[error("HTTP client error: {0}")]
    Client(String),
}
