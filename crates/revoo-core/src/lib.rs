//! Revoo core library - authenticated API client, token store and models.
//!
//! The `ApiClient` is constructed once at startup with a `TokenStore`
//! injected, and every backend call goes through it:
//!
//! ```no_run
//! use std::sync::Arc;
//! use revoo_core::{ApiClient, Config, FileTokenStore};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let store = Arc::new(FileTokenStore::new(config.data_dir()?));
//! let client = ApiClient::new(&config, store)?;
//!
//! client.login("ana@revoo.dev", "secret").await?;
//! for habit in client.list_habits().await? {
//!     println!("{}", habit.titulo);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiClient, ApiError};
pub use auth::{FileTokenStore, KeychainTokenStore, MemoryTokenStore, StorageError, TokenStore};
pub use config::{Config, ConfigError, TokenBackend};
pub use models::ValidationError;
