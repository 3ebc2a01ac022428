//! Object storage for uploaded document and lexicon files.
//!
//! The [`ObjectStore`] trait is the seam between request handlers and the
//! backing store: production uses [`S3Store`], tests use [`MemoryStore`].
//! Keys are the sanitized filenames chosen at upload time.

pub mod memory;
pub mod s3_store;

pub use memory::MemoryStore;
pub use s3_store::S3Store;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("storage credentials error: {0}")]
    Credentials(#[from] s3::creds::error::CredentialsError),

    #[error("storage request failed: {0}")]
    S3(#[from] s3::error::S3Error),

    #[error("unrecognized storage region: {region}")]
    InvalidRegion { region: String },

    #[error("storage returned unexpected status {status}")]
    UnexpectedStatus { status: u16 },
}

/// Byte-oriented object store keyed by filename.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `key`, replacing any existing object.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend rejects the write.
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;

    /// Fetch the object stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] when no such object exists, or
    /// another [`StorageError`] when the backend fails.
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;
}
