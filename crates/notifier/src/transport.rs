//! Single-attempt HTTP transport for the notification API.
//!
//! One call to [`Transport::send`] is exactly one network attempt. Retrying is
//! left entirely to [`RetryDispatcher`](crate::dispatcher::RetryDispatcher).

use std::future::Future;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

use relay_common::types::{AttemptOutcome, Credentials, NotificationRequest};

use crate::error::NotifierError;

/// Default hard timeout for one attempt.
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Performs one send attempt and classifies the result.
pub trait Transport: Send + Sync {
    fn send(&self, request: &NotificationRequest) -> impl Future<Output = AttemptOutcome> + Send;
}

impl<T: Transport> Transport for &T {
    fn send(&self, request: &NotificationRequest) -> impl Future<Output = AttemptOutcome> + Send {
        (**self).send(request)
    }
}

/// Transport settings fixed for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl TransportConfig {
    pub fn new(endpoint: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}

/// `reqwest`-backed transport posting JSON to the notification API.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: TransportConfig,
}

impl HttpTransport {
    /// Build a transport with the API headers derived from `credentials`.
    pub fn new(config: TransportConfig, credentials: &Credentials) -> Result<Self, NotifierError> {
        let mut authorization = HeaderValue::from_str(&credentials.authorization())
            .map_err(|_| NotifierError::Client("API token is not a valid header value".into()))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, authorization);

        // No idle pool: a stale pooled connection must not be silently retried.
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::none())
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| NotifierError::Client(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: &NotificationRequest) -> AttemptOutcome {
        tracing::info!(
            receivers = ?request.receivers(),
            body = request.body(),
            "Sending notification"
        );

        let response = match self
            .client
            .post(&self.config.endpoint)
            .json(&request.payload())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let reason = if e.is_timeout() {
                    format!(
                        "request timed out after {}ms",
                        self.config.timeout.as_millis()
                    )
                } else if e.is_connect() {
                    format!("connection failed: {}", e)
                } else {
                    e.to_string()
                };
                tracing::warn!(endpoint = %self.config.endpoint, %reason, "Send attempt failed");
                return AttemptOutcome::ConnectionFailed { reason };
            }
        };

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_else(|e| {
            tracing::debug!(status, error = %e, "Failed to read response body");
            String::new()
        });

        let outcome = AttemptOutcome::from_status(status, body);
        tracing::debug!(status, outcome = %outcome, "Received response");
        outcome
    }
}
