use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Message reported when the notification API accepted the request.
pub const SUCCESS_MESSAGE: &str = "Calling the API Succeeded!";

/// Message reported when no attempt produced a usable HTTP response.
pub const FAILURE_MESSAGE: &str = "Calling the API Failed!";

/// Authentication material for the notification API, decoded from the secret store.
///
/// Resolved once per process and shared read-only afterwards.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    /// API token, sent as `Authorization: Token <token>`
    #[serde(rename = "api_token")]
    pub token: String,
    /// Receivers used when the invocation does not name its own
    #[serde(rename = "default_receiver", default)]
    pub default_receivers: Vec<String>,
}

impl Credentials {
    pub fn new(token: impl Into<String>, default_receivers: Vec<String>) -> Self {
        Self {
            token: token.into(),
            default_receivers,
        }
    }

    /// Value of the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("Token {}", self.token)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("default_receivers", &self.default_receivers)
            .finish()
    }
}

/// One message to deliver. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    receivers: Vec<String>,
    subject: String,
    body: String,
    template: String,
}

impl NotificationRequest {
    /// Build a request. At least one receiver is required.
    pub fn new(
        receivers: Vec<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
        template: impl Into<String>,
    ) -> Result<Self, AppError> {
        if receivers.is_empty() {
            return Err(AppError::Validation(
                "notification requires at least one receiver".to_string(),
            ));
        }

        Ok(Self {
            receivers,
            subject: subject.into(),
            body: body.into(),
            template: template.into(),
        })
    }

    pub fn receivers(&self) -> &[String] {
        &self.receivers
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// JSON body expected by the notification API.
    pub fn payload(&self) -> NotificationPayload<'_> {
        NotificationPayload {
            template: &self.template,
            content: &self.body,
            receivers: &self.receivers,
        }
    }
}

/// Wire body of `POST <notify_url>`.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationPayload<'a> {
    pub template: &'a str,
    pub content: &'a str,
    pub receivers: &'a [String],
}

/// Classified result of a single send attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// HTTP 200.
    Delivered,
    /// Any other status below 500. Carries the response body.
    RejectedTerminal { status: u16, body: String },
    /// HTTP 5xx.
    ServerRetryable { status: u16, body: String },
    /// No status line was received (DNS, refused, timeout).
    ConnectionFailed { reason: String },
}

impl AttemptOutcome {
    /// Classify an HTTP response. Redirects are not followed, so 3xx lands here too.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            200 => AttemptOutcome::Delivered,
            500.. => AttemptOutcome::ServerRetryable { status, body },
            _ => AttemptOutcome::RejectedTerminal { status, body },
        }
    }

    /// Whether no further attempt should follow this one.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AttemptOutcome::Delivered | AttemptOutcome::RejectedTerminal { .. }
        )
    }

    /// Human-readable status reported to the caller when this is the last outcome.
    pub fn message(&self) -> String {
        match self {
            AttemptOutcome::Delivered => SUCCESS_MESSAGE.to_string(),
            AttemptOutcome::RejectedTerminal { body, .. } => format!("Error: {}", body),
            AttemptOutcome::ServerRetryable { status, body } => {
                format!("Error: HTTP {}: {}", status, body)
            }
            AttemptOutcome::ConnectionFailed { .. } => FAILURE_MESSAGE.to_string(),
        }
    }
}

impl std::fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptOutcome::Delivered => write!(f, "delivered"),
            AttemptOutcome::RejectedTerminal { .. } => write!(f, "rejected_terminal"),
            AttemptOutcome::ServerRetryable { .. } => write!(f, "server_retryable"),
            AttemptOutcome::ConnectionFailed { .. } => write!(f, "connection_failed"),
        }
    }
}

/// Final outcome of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchResult {
    pub succeeded: bool,
    pub message: String,
    pub attempts_made: u32,
}

/// What the invocation hands back to its trigger.
///
/// `body` is the status message JSON-encoded as a string literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResult {
    pub status_code: u16,
    pub body: String,
}

impl InvocationResult {
    pub fn success(message: &str) -> Self {
        Self::with_status(200, message)
    }

    pub fn failure(message: &str) -> Self {
        Self::with_status(400, message)
    }

    fn with_status(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            body: serde_json::Value::String(message.to_string()).to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

impl From<&DispatchResult> for InvocationResult {
    fn from(result: &DispatchResult) -> Self {
        if result.succeeded {
            Self::success(&result.message)
        } else {
            Self::failure(&result.message)
        }
    }
}
