//! File-backed secret store.
//!
//! Secrets live at `<root>/<region>/<secret_id>.json`, each holding a document
//! shaped like a secret manager response:
//!
//! ```json
//! { "SecretString": "{\"api_token\": \"...\"}" }
//! { "SecretBinary": "eyJhcGlfdG9rZW4iOiAiLi4uIn0=" }
//! ```
//!
//! Secret ids may contain `/`, which maps onto subdirectories.

use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::{SecretStore, SecretValue, StoreError, StoreErrorCode};

#[derive(Debug, Deserialize)]
struct SecretDocument {
    #[serde(rename = "SecretString")]
    secret_string: Option<String>,
    #[serde(rename = "SecretBinary")]
    secret_binary: Option<String>,
}

/// Secret store reading JSON documents from a directory tree.
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    root: PathBuf,
}

impl FileSecretStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn secret_path(&self, secret_id: &str, region: &str) -> Result<PathBuf, StoreError> {
        if secret_id.trim().is_empty() {
            return Err(StoreError::new(
                StoreErrorCode::InvalidParameter,
                "secret id must not be empty",
            ));
        }
        if region.trim().is_empty() || !is_plain_relative(Path::new(region)) {
            return Err(StoreError::new(
                StoreErrorCode::InvalidParameter,
                format!("invalid region '{}'", region),
            ));
        }
        if !is_plain_relative(Path::new(secret_id)) {
            return Err(StoreError::new(
                StoreErrorCode::InvalidParameter,
                format!("invalid secret id '{}'", secret_id),
            ));
        }

        Ok(self.root.join(region).join(format!("{}.json", secret_id)))
    }
}

/// Only normal components, so ids cannot escape the store root.
fn is_plain_relative(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_)))
}

impl SecretStore for FileSecretStore {
    fn get_secret_value(&self, secret_id: &str, region: &str) -> Result<SecretValue, StoreError> {
        let path = self.secret_path(secret_id, region)?;

        tracing::debug!(path = %path.display(), "Reading secret document");

        let raw = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StoreError::new(
                StoreErrorCode::ResourceNotFound,
                format!("secret '{}' not found in region {}", secret_id, region),
            ),
            _ => StoreError::new(
                StoreErrorCode::InternalServiceError,
                format!("failed to read {}: {}", path.display(), e),
            ),
        })?;

        let document: SecretDocument = serde_json::from_str(&raw).map_err(|e| {
            StoreError::new(
                StoreErrorCode::InvalidRequest,
                format!("invalid secret document: {}", e),
            )
        })?;

        match (document.secret_string, document.secret_binary) {
            (Some(text), None) => Ok(SecretValue::Text(text)),
            (None, Some(encoded)) => Ok(SecretValue::Binary(encoded.into_bytes())),
            _ => Err(StoreError::new(
                StoreErrorCode::InvalidRequest,
                "secret document must hold exactly one of SecretString or SecretBinary",
            )),
        }
    }
}
