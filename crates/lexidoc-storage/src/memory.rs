//! In-memory object store for tests and local development.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{ObjectStore, StorageError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let mut objects = self.objects.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        objects.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let objects = self.objects.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        objects
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                key: key.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_returns_objects() {
        let store = MemoryStore::new();
        store.put("report.pdf", b"bytes").await.unwrap();
        assert_eq!(store.get("report.pdf").await.unwrap(), b"bytes");
    }

    #[tokio::test]
    async fn missing_key_is_not_found() {
        let store = MemoryStore::new();
        let err = store.get("absent.pdf").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { ref key } if key == "absent.pdf"));
    }

    #[tokio::test]
    async fn put_replaces_existing_object() {
        let store = MemoryStore::new();
        store.put("report.pdf", b"old").await.unwrap();
        store.put("report.pdf", b"new").await.unwrap();
        assert_eq!(store.get("report.pdf").await.unwrap(), b"new");
    }
}
