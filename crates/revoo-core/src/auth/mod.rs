//! Credential persistence for the API client.
//!
//! This module provides:
//! - `TokenStore`: the single-slot, async credential store contract
//! - `FileTokenStore`: token file in the data directory, replaced atomically
//! - `KeychainTokenStore`: OS-level credential storage via keyring
//! - `MemoryTokenStore`: process-local store for tests and throwaway sessions
//!
//! Exactly one credential (or none) exists at a time. The store owns it;
//! the API client reads it again for every request.

pub mod error;
pub mod file;
pub mod keychain;
pub mod store;

pub use error::StorageError;
pub use file::FileTokenStore;
pub use keychain::KeychainTokenStore;
pub use store::{MemoryTokenStore, TokenStore};
