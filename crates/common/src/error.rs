use thiserror::Error;

/// Common error types used across the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Message reported back to the trigger when an invocation fails before dispatch.
    pub fn public_message(&self) -> String {
        format!("Error: {}", self)
    }
}
