//! Secret store access and credential decoding.
//!
//! The store itself is a key-value lookup behind the [`SecretStore`] trait.
//! [`CredentialResolver`] turns whatever the store returns into
//! [`Credentials`](relay_common::types::Credentials), or fails. It never
//! retries and never caches.

pub mod file;
pub mod memory;
pub mod resolver;

use thiserror::Error;

pub use file::FileSecretStore;
pub use memory::InMemorySecretStore;
pub use resolver::CredentialResolver;

/// Raw secret as returned by the store. Exactly one form is populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretValue {
    /// UTF-8 secret string.
    Text(String),
    /// Binary secret, still base64-encoded as the store transmits it.
    Binary(Vec<u8>),
}

/// Error codes a secret store may report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreErrorCode {
    /// The store could not decrypt the protected secret.
    DecryptionFailure,
    /// Server-side failure in the store.
    InternalServiceError,
    /// A parameter value was invalid.
    InvalidParameter,
    /// A parameter was not valid for the current state of the resource.
    InvalidRequest,
    /// No secret with that identifier exists.
    ResourceNotFound,
    /// Any code outside the known set.
    Other(String),
}

impl StoreErrorCode {
    /// Map a store error code string onto the known set.
    pub fn parse(code: &str) -> Self {
        match code {
            "DecryptionFailureException" => StoreErrorCode::DecryptionFailure,
            "InternalServiceErrorException" => StoreErrorCode::InternalServiceError,
            "InvalidParameterException" => StoreErrorCode::InvalidParameter,
            "InvalidRequestException" => StoreErrorCode::InvalidRequest,
            "ResourceNotFoundException" => StoreErrorCode::ResourceNotFound,
            other => StoreErrorCode::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreErrorCode::DecryptionFailure => write!(f, "DecryptionFailureException"),
            StoreErrorCode::InternalServiceError => write!(f, "InternalServiceErrorException"),
            StoreErrorCode::InvalidParameter => write!(f, "InvalidParameterException"),
            StoreErrorCode::InvalidRequest => write!(f, "InvalidRequestException"),
            StoreErrorCode::ResourceNotFound => write!(f, "ResourceNotFoundException"),
            StoreErrorCode::Other(code) => write!(f, "{}", code),
        }
    }
}

/// Failure reported by a [`SecretStore`] backend.
#[derive(Debug, Clone, Error)]
#[error("{code}: {message}")]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
}

impl StoreError {
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Credential resolution failures. Both are fatal to an invocation.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Secret '{secret_id}' unavailable: {source}")]
    SecretUnavailable {
        secret_id: String,
        #[source]
        source: StoreError,
    },

    #[error("Malformed secret: {0}")]
    MalformedSecret(String),
}

impl SecretError {
    /// Store error code behind an unavailable secret, if any.
    pub fn store_code(&self) -> Option<&StoreErrorCode> {
        match self {
            SecretError::SecretUnavailable { source, .. } => Some(&source.code),
            SecretError::MalformedSecret(_) => None,
        }
    }
}

/// Key-value lookup of secrets by identifier and region.
pub trait SecretStore: Send + Sync {
    fn get_secret_value(&self, secret_id: &str, region: &str) -> Result<SecretValue, StoreError>;
}

impl<S: SecretStore + ?Sized> SecretStore for &S {
    fn get_secret_value(&self, secret_id: &str, region: &str) -> Result<SecretValue, StoreError> {
        (**self).get_secret_value(secret_id, region)
    }
}
