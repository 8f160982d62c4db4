//! REST API client module for the Revoo backend.
//!
//! This module provides the `ApiClient`, the single path every backend call
//! goes through. It resolves paths against the configured origin, sets the
//! JSON content type and attaches the bearer token read from the injected
//! `TokenStore` at dispatch time.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
pub use reqwest::StatusCode;
