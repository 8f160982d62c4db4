use std::sync::Mutex;

use async_trait::async_trait;

use super::StorageError;

/// Durable single-slot storage for the bearer token.
///
/// Every operation is a suspension point. Callers must await `save` before
/// starting anything that issues new requests, otherwise the next request
/// may go out with the previous credential.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Persist `token`, replacing any existing value.
    async fn save(&self, token: &str) -> Result<(), StorageError>;

    /// Current token, or `None` if none was saved or it was cleared.
    async fn read(&self) -> Result<Option<String>, StorageError>;

    /// Remove the stored token. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// In-process store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(token.into())),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, StorageError> {
        self.slot
            .lock()
            .map_err(|_| StorageError::Corrupt("token slot lock poisoned".to_string()))
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn save(&self, token: &str) -> Result<(), StorageError> {
        *self.lock()? = Some(token.to_string());
        Ok(())
    }

    async fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.clone())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        *self.lock()? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_without_save_is_absent() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_then_read() {
        let store = MemoryTokenStore::new();
        store.save("abc123").await.unwrap();
        assert_eq!(store.read().await.unwrap().as_deref(), Some("abc123"));

        // Re-login overwrites
        store.save("def456").await.unwrap();
        assert_eq!(store.read().await.unwrap().as_deref(), Some("def456"));
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let store = MemoryTokenStore::with_token("abc123");
        store.clear().await.unwrap();
        assert_eq!(store.read().await.unwrap(), None);
        store.clear().await.unwrap();
        assert_eq!(store.read().await.unwrap(), None);
    }
}
