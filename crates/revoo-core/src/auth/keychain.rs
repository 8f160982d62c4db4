use async_trait::async_trait;
use keyring::Entry;
use tracing::debug;

use super::{StorageError, TokenStore};

const SERVICE_NAME: &str = "revoo";

/// Keychain account the bearer token is filed under
const TOKEN_ACCOUNT: &str = "token";

/// Token kept in the OS keychain.
///
/// Keychain calls block, so each one runs on the blocking pool.
#[derive(Debug, Clone)]
pub struct KeychainTokenStore {
    service: String,
}

impl KeychainTokenStore {
    pub fn new() -> Self {
        Self::with_service(SERVICE_NAME)
    }

    /// Use a different keychain service name, e.g. one per backend environment
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    async fn with_entry<T, F>(&self, op: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(Entry) -> Result<T, keyring::Error> + Send + 'static,
    {
        let service = self.service.clone();
        tokio::task::spawn_blocking(move || {
            let entry = Entry::new(&service, TOKEN_ACCOUNT)?;
            op(entry)
        })
        .await
        .map_err(|e| StorageError::Keychain(format!("keychain task failed: {}", e)))?
        .map_err(StorageError::from)
    }
}

impl Default for KeychainTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStore for KeychainTokenStore {
    async fn save(&self, token: &str) -> Result<(), StorageError> {
        let token = token.to_string();
        self.with_entry(move |entry| entry.set_password(&token)).await?;
        debug!(service = %self.service, "Token stored in keychain");
        Ok(())
    }

    async fn read(&self) -> Result<Option<String>, StorageError> {
        self.with_entry(|entry| match entry.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e),
        })
        .await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.with_entry(|entry| match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e),
        })
        .await?;
        debug!(service = %self.service, "Token removed from keychain");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Needs a reachable OS keychain (macOS Keychain, Windows Credential
    // Manager or a Linux session keyring); run with `--ignored`.
    #[tokio::test]
    #[ignore]
    async fn test_keychain_round_trip() {
        let store = KeychainTokenStore::with_service("revoo-test-round-trip");
        store.clear().await.unwrap();
        assert_eq!(store.read().await.unwrap(), None);

        store.save("abc123").await.unwrap();
        assert_eq!(store.read().await.unwrap().as_deref(), Some("abc123"));

        // Another handle to the same service sees the same slot
        let other = KeychainTokenStore::with_service("revoo-test-round-trip");
        assert_eq!(other.read().await.unwrap().as_deref(), Some("abc123"));

        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(other.read().await.unwrap(), None);
    }
}
