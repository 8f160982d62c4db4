use thiserror::Error;

/// Failure of the credential persistence layer.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Token storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored token is unreadable: {0}")]
    Corrupt(String),

    #[error("Keychain error: {0}")]
    Keychain(String),
}

impl From<keyring::Error> for StorageError {
    fn from(err: keyring::Error) -> Self {
        StorageError::Keychain(err.to_string())
    }
}
