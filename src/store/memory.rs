//! In-process document store

use std::collections::HashMap;
use std::sync::RwLock;

use log::debug;
use serde_json::Value;

use super::{array_union, Document, DocumentStore};
use crate::error::StoreError;

/// Thread-safe in-memory [`DocumentStore`]
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<String, Document>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.documents.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("document store lock poisoned".to_string())
}

impl DocumentStore for InMemoryDocumentStore {
    fn create_document(&self, key: &str, document: Document) -> Result<(), StoreError> {
        let mut documents = self.documents.write().map_err(|_| poisoned())?;
        if documents.contains_key(key) {
            return Err(StoreError::AlreadyExists(key.to_string()));
        }
        debug!("creating document {}", key);
        documents.insert(key.to_string(), document);
        Ok(())
    }

    fn read_document(&self, key: &str) -> Result<Option<Document>, StoreError> {
        let documents = self.documents.read().map_err(|_| poisoned())?;
        Ok(documents.get(key).cloned())
    }

    fn append_to_array_field(&self, key: &str, field: &str, record: Value) -> Result<(), StoreError> {
        let mut documents = self.documents.write().map_err(|_| poisoned())?;
        let document = documents
            .get_mut(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        debug!("appending to {}.{}", key, field);
        array_union(document, key, field, record)
    }

    fn update_fields(&self, key: &str, fields: Document) -> Result<(), StoreError> {
        let mut documents = self.documents.write().map_err(|_| poisoned())?;
        let document = documents
            .get_mut(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        debug!("updating {} field(s) of {}", fields.len(), key);
        document.extend(fields);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_create_and_read() {
        let store = InMemoryDocumentStore::new();
        assert!(store.is_empty());

        store.create_document("u1", doc(json!({"email": "a@example.com"}))).unwrap();
        let read = store.read_document("u1").unwrap().unwrap();
        assert_eq!(read["email"], "a@example.com");
        assert!(store.read_document("u2").unwrap().is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_create_twice_fails() {
        let store = InMemoryDocumentStore::new();
        store.create_document("u1", Document::new()).unwrap();
        assert!(matches!(
            store.create_document("u1", Document::new()),
            Err(StoreError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_append_to_missing_document() {
        let store = InMemoryDocumentStore::new();
        let err = store.append_to_array_field("nobody", "items", json!(1)).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_update_fields_merges() {
        let store = InMemoryDocumentStore::new();
        store
            .create_document("u1", doc(json!({"email": "a@example.com", "items": [1, 2]})))
            .unwrap();

        store
            .update_fields("u1", doc(json!({"displayName": "Ada", "email": "b@example.com"})))
            .unwrap();

        let read = store.read_document("u1").unwrap().unwrap();
        assert_eq!(read["displayName"], "Ada");
        assert_eq!(read["email"], "b@example.com");
        assert_eq!(read["items"], json!([1, 2]));

        let err = store.update_fields("u2", Document::new()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_append_from_many_threads() {
        let store = InMemoryDocumentStore::new();
        store.create_document("u1", Document::new()).unwrap();

        std::thread::scope(|scope| {
            for i in 0..8 {
                let store = &store;
                scope.spawn(move || store.append_to_array_field("u1", "items", json!(i)).unwrap());
            }
        });

        let read = store.read_document("u1").unwrap().unwrap();
        assert_eq!(read["items"].as_array().unwrap().len(), 8);
    }
}
