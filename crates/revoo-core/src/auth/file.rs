use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::{StorageError, TokenStore};

/// Token file name in the data directory
const TOKEN_FILE: &str = "token.json";

/// Scratch file written before being renamed over `TOKEN_FILE`
const TOKEN_TMP_FILE: &str = "token.json.tmp";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenRecord {
    token: String,
    saved_at: DateTime<Utc>,
}

/// Token persisted as JSON under the data directory.
///
/// Writes go to a scratch file that is flushed and then renamed over the
/// real one, so a concurrent `read` sees either the old token or the new
/// one and never a torn write.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn tmp_path(&self) -> PathBuf {
        self.dir.join(TOKEN_TMP_FILE)
    }

    async fn write_atomic(&self, tmp: &Path, contents: &[u8]) -> Result<(), StorageError> {
        let mut file = tokio::fs::File::create(tmp).await?;
        file.write_all(contents).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(tmp, self.path()).await?;
        Ok(())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn save(&self, token: &str) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let record = TokenRecord {
            token: token.to_string(),
            saved_at: Utc::now(),
        };
        let contents = serde_json::to_vec_pretty(&record)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;

        let tmp = self.tmp_path();
        if let Err(e) = self.write_atomic(&tmp, &contents).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e);
        }
        debug!(path = %self.path().display(), "Token saved");
        Ok(())
    }

    async fn read(&self) -> Result<Option<String>, StorageError> {
        let contents = match tokio::fs::read(self.path()).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record: TokenRecord = serde_json::from_slice(&contents)
            .map_err(|e| StorageError::Corrupt(format!("{}: {}", TOKEN_FILE, e)))?;
        Ok(Some(record.token))
    }

    async fn clear(&self) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path()).await {
            Ok(()) => {
                debug!(path = %self.path().display(), "Token cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_reads_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path());
        assert_eq!(store.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_token_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        FileTokenStore::new(dir.path()).save("abc123").await.unwrap();

        // A fresh instance over the same directory stands in for a new process
        let reopened = FileTokenStore::new(dir.path());
        assert_eq!(reopened.read().await.unwrap().as_deref(), Some("abc123"));
        assert!(!dir.path().join(TOKEN_TMP_FILE).exists());
    }

    #[tokio::test]
    async fn test_save_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("revoo"));
        store.save("xyz").await.unwrap();
        assert_eq!(store.read().await.unwrap().as_deref(), Some("xyz"));
    }

    #[tokio::test]
    async fn test_clear_twice() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path());
        store.save("abc123").await.unwrap();
        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.read().await.unwrap(), None);
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_garbage_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path());
        std::fs::write(store.path(), "not json").unwrap();
        assert!(matches!(store.read().await, Err(StorageError::Corrupt(_))));
    }
}
