//! Bounded retry loop around a [`Transport`].
//!
//! Attempts are spaced by a fixed wait. There is no backoff growth and no jitter.
//! `Delivered` and `RejectedTerminal` stop the loop; `ServerRetryable` and
//! `ConnectionFailed` are retried while budget remains.

use std::time::Duration;

use relay_common::types::{AttemptOutcome, DispatchResult, NotificationRequest};

use crate::error::NotifierError;
use crate::transport::Transport;

/// Drives up to `max_attempts` sends of one request.
pub struct RetryDispatcher<T> {
    transport: T,
}

impl<T: Transport> RetryDispatcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Send `request`, retrying transient failures.
    ///
    /// Sleeps `wait_secs` between attempts but not after the last one.
    /// A zero attempt budget is a configuration error and sends nothing.
    pub async fn dispatch(
        &self,
        request: &NotificationRequest,
        max_attempts: u32,
        wait_secs: u64,
    ) -> Result<DispatchResult, NotifierError> {
        if max_attempts == 0 {
            return Err(NotifierError::InvalidAttemptBudget(max_attempts));
        }

        let wait = Duration::from_secs(wait_secs);
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            let outcome = self.transport.send(request).await;

            match &outcome {
                AttemptOutcome::Delivered => {
                    tracing::info!(attempt = attempts, "Notification delivered");
                    return Ok(Self::finish(true, &outcome, attempts));
                }
                AttemptOutcome::RejectedTerminal { status, body } => {
                    tracing::warn!(
                        attempt = attempts,
                        status,
                        body = body.as_str(),
                        "Notification rejected, not retrying"
                    );
                    return Ok(Self::finish(false, &outcome, attempts));
                }
                AttemptOutcome::ServerRetryable { status, .. } => {
                    tracing::warn!(attempt = attempts, max_attempts, status, "Server error");
                }
                AttemptOutcome::ConnectionFailed { reason } => {
                    tracing::debug!(
                        attempt = attempts,
                        max_attempts,
                        reason = reason.as_str(),
                        "Resending notification after connection failure"
                    );
                }
            }

            if attempts >= max_attempts {
                tracing::error!(
                    attempts,
                    last_outcome = %outcome,
                    "Attempt budget exhausted"
                );
                return Ok(Self::finish(false, &outcome, attempts));
            }

            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }
        }
    }

    fn finish(succeeded: bool, outcome: &AttemptOutcome, attempts_made: u32) -> DispatchResult {
        DispatchResult {
            succeeded,
            message: outcome.message(),
            attempts_made,
        }
    }
}
