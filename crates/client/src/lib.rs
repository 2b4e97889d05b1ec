//! # Mobistore Client
//!
//! Typed HTTP client for the Mobistore retail backend.
//!
//! This crate contains:
//! - The shared request pipeline (timeout, classification, retry, envelope
//!   unwrap)
//! - Session/token storage with an injectable persistence backend
//! - Resource methods for phones, inquiries, analytics, audit logs, and auth
//! - The standalone multipart image-upload path
//!
//! ## Architecture
//! - Domain types and the error taxonomy live in `mobistore-domain`
//! - Contains all "impure" code (network I/O, credential storage)

pub mod client;
pub mod config;
pub mod http;
pub mod session;
pub mod upload;

// Re-export commonly used items
pub use client::StoreClient;
pub use config::ClientConfig;
pub use http::HttpClient;
pub use mobistore_domain::{ApiError, Result};
pub use session::{KeyringTokenStore, MemoryTokenStore, Session, TokenStore};
pub use upload::UploadClient;
