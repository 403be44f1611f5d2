//! Invocation entrypoint.
//!
//! Credentials are resolved once when the handler is built. Each call to
//! [`NotifyHandler::handle`] builds one request, runs one dispatch and always
//! returns an [`InvocationResult`].

use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use relay_common::config::AppConfig;
use relay_common::types::{Credentials, InvocationResult, NotificationRequest};
use relay_secrets::{CredentialResolver, SecretStore};

use crate::dispatcher::RetryDispatcher;
use crate::error::NotifierError;
use crate::event::{self, EventField};
use crate::transport::{HttpTransport, Transport, TransportConfig};

/// Wires configuration, credentials and transport into single dispatches.
pub struct NotifyHandler<T> {
    config: AppConfig,
    credentials: Credentials,
    dispatcher: RetryDispatcher<T>,
}

impl NotifyHandler<HttpTransport> {
    /// Resolve credentials from `store` and build the HTTP transport.
    ///
    /// Fails before any send attempt if the secret is unavailable or malformed.
    pub fn from_store<S: SecretStore>(config: AppConfig, store: S) -> Result<Self, NotifierError> {
        let credentials = CredentialResolver::new(store)
            .resolve(&config.token_secret_name, &config.region)?;

        let transport = HttpTransport::new(
            TransportConfig::new(config.notify_url.clone(), config.timeout_ms),
            &credentials,
        )?;

        Ok(Self::new(config, credentials, transport))
    }
}

impl<T: Transport> NotifyHandler<T> {
    pub fn new(config: AppConfig, credentials: Credentials, transport: T) -> Self {
        Self {
            config,
            credentials,
            dispatcher: RetryDispatcher::new(transport),
        }
    }

    /// Handle one trigger event.
    pub async fn handle(&self, event: &Value) -> InvocationResult {
        let span = tracing::info_span!("invocation", invocation_id = %Uuid::new_v4());
        self.handle_inner(event).instrument(span).await
    }

    async fn handle_inner(&self, event: &Value) -> InvocationResult {
        tracing::debug!(event = %event, "Received event");

        let subject = event::extract_or(event, EventField::Subject, &self.config.subject);
        let body = event::extract_or(event, EventField::Body, &self.config.body);
        let receivers = self.receivers();

        tracing::info!(
            ?receivers,
            subject = subject.as_str(),
            body = body.as_str(),
            "Prepared notification"
        );

        let request =
            match NotificationRequest::new(receivers, subject, body, self.config.template.clone()) {
                Ok(request) => request,
                Err(e) => {
                    tracing::error!(error = %e, "Cannot build notification");
                    return InvocationResult::failure(&e.public_message());
                }
            };

        match self
            .dispatcher
            .dispatch(&request, self.config.max_tries, self.config.wait_secs)
            .await
        {
            Ok(result) => {
                tracing::info!(
                    succeeded = result.succeeded,
                    attempts = result.attempts_made,
                    "Dispatch finished"
                );
                InvocationResult::from(&result)
            }
            Err(e) => {
                tracing::error!(error = %e, "Dispatch not attempted");
                InvocationResult::failure(&format!("Error: {}", e))
            }
        }
    }

    /// Secret-provided receivers, or the configured list when the secret has none.
    fn receivers(&self) -> Vec<String> {
        if self.credentials.default_receivers.is_empty() {
            self.config.receivers.clone()
        } else {
            self.credentials.default_receivers.clone()
        }
    }
}
