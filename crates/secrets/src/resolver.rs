use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use relay_common::types::Credentials;

use crate::{SecretError, SecretStore, SecretValue};

/// Fetches and decodes API credentials from a [`SecretStore`].
pub struct CredentialResolver<S> {
    store: S,
}

impl<S: SecretStore> CredentialResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Fetch `secret_id` from the store and decode it into [`Credentials`].
    ///
    /// Every store error is surfaced as `SecretUnavailable`; nothing is retried.
    pub fn resolve(&self, secret_id: &str, region: &str) -> Result<Credentials, SecretError> {
        let value = self
            .store
            .get_secret_value(secret_id, region)
            .map_err(|source| {
                tracing::error!(
                    secret_id,
                    region,
                    code = %source.code,
                    "Secret store lookup failed"
                );
                SecretError::SecretUnavailable {
                    secret_id: secret_id.to_string(),
                    source,
                }
            })?;

        let credentials = decode(value)?;

        tracing::info!(
            secret_id,
            default_receivers = credentials.default_receivers.len(),
            "Credentials resolved"
        );

        Ok(credentials)
    }
}

/// Decode a raw secret. Binary payloads are base64-decoded before parsing.
pub fn decode(value: SecretValue) -> Result<Credentials, SecretError> {
    let text = match value {
        SecretValue::Text(text) => text,
        SecretValue::Binary(encoded) => {
            let bytes = STANDARD
                .decode(&encoded)
                .map_err(|e| SecretError::MalformedSecret(format!("invalid base64: {}", e)))?;
            String::from_utf8(bytes)
                .map_err(|_| SecretError::MalformedSecret("binary secret is not UTF-8".into()))?
        }
    };

    if text.trim().is_empty() {
        return Err(SecretError::MalformedSecret("secret payload is empty".into()));
    }

    let document: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| SecretError::MalformedSecret(format!("invalid JSON: {}", e)))?;

    if document.get("api_token").is_none() {
        return Err(SecretError::MalformedSecret(
            "secret has no api_token field".into(),
        ));
    }

    serde_json::from_value(document)
        .map_err(|e| SecretError::MalformedSecret(format!("unexpected secret shape: {}", e)))
}
