//! In-memory storage backend, for tests and unsaved scratch documents.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::document::PathDocument;
use std::collections::HashMap;
use std::sync::Mutex;

/// Keeps documents as JSON in a mutex-guarded map.
#[derive(Default)]
pub struct MemoryStorage {
    documents: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned lock only means another test thread panicked mid-write
        self.documents.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, document: &PathDocument) -> BoxFuture<'_, StorageResult<()>> {
        let result = document
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))
            .map(|json| {
                self.lock().insert(id.to_string(), json);
            });
        Box::pin(async move { result })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<PathDocument>> {
        let result = match self.lock().get(id) {
            Some(json) => PathDocument::from_json(json)
                .map_err(|e| StorageError::Serialization(e.to_string())),
            None => Err(StorageError::NotFound(id.to_string())),
        };
        Box::pin(async move { result })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        self.lock().remove(id);
        Box::pin(async move { Ok(()) })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        let ids = self.lock().keys().cloned().collect();
        Box::pin(async move { Ok(ids) })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let found = self.lock().contains_key(id);
        Box::pin(async move { Ok(found) })
    }
}
