use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{SecretStore, SecretValue, StoreError, StoreErrorCode};

/// In-memory secret store. Region is ignored.
///
/// Counts lookups so callers can assert how often the store was hit.
#[derive(Default)]
pub struct InMemorySecretStore {
    entries: Mutex<HashMap<String, Result<SecretValue, StoreErrorCode>>>,
    lookups: AtomicUsize,
}

impl InMemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, secret_id: &str, value: SecretValue) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(secret_id.to_string(), Ok(value));
    }

    /// Make lookups of `secret_id` fail with `code`.
    pub fn insert_error(&self, secret_id: &str, code: StoreErrorCode) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(secret_id.to_string(), Err(code));
    }

    /// Number of `get_secret_value` calls so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl SecretStore for InMemorySecretStore {
    fn get_secret_value(&self, secret_id: &str, _region: &str) -> Result<SecretValue, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        let entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match entries.get(secret_id) {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(code)) => Err(StoreError::new(code.clone(), "injected store failure")),
            None => Err(StoreError::new(
                StoreErrorCode::ResourceNotFound,
                format!("secret '{}' not found", secret_id),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_secret_is_not_found() {
        let store = InMemorySecretStore::new();
        let err = store.get_secret_value("missing", "us-east-1").unwrap_err();
        assert_eq!(err.code, StoreErrorCode::ResourceNotFound);
        assert_eq!(store.lookups(), 1);
    }

    #[test]
    fn test_insert_overrides_error() {
        let store = InMemorySecretStore::new();
        store.insert_error("s", StoreErrorCode::InternalServiceError);
        store.insert("s", SecretValue::Text("{}".into()));
        assert_eq!(
            store.get_secret_value("s", "eu-west-1").unwrap(),
            SecretValue::Text("{}".into())
        );
    }
}
