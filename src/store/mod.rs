//! Per-user document storage
//!
//! Documents are JSON objects keyed by user id, one per registered user.
//! History lists are appended with array-union semantics: an element equal
//! to one already stored is not added twice.

mod memory;
mod user;

pub use memory::InMemoryDocumentStore;
pub use user::{UserDocument, CONVERSION_HISTORY_FIELD, SAVINGS_CALCULATIONS_FIELD};

use serde_json::{Map, Value};

use crate::error::StoreError;

/// Raw stored document
pub type Document = Map<String, Value>;

/// Contract of the hosted document database
pub trait DocumentStore: Send + Sync {
    /// Create the document for `key`, failing if one already exists
    fn create_document(&self, key: &str, document: Document) -> Result<(), StoreError>;

    /// Read the document for `key`, `None` if it has never been created
    fn read_document(&self, key: &str) -> Result<Option<Document>, StoreError>;

    /// Append `record` to the array `field` of document `key`
    ///
    /// A missing field is created. Nothing is appended if an equal element
    /// is already present.
    fn append_to_array_field(&self, key: &str, field: &str, record: Value) -> Result<(), StoreError>;

    /// Overwrite the given top-level fields of document `key`
    ///
    /// Fields not named in `fields` are left as they are.
    fn update_fields(&self, key: &str, fields: Document) -> Result<(), StoreError>;

    /// Read and decode the typed view of a user's document
    fn read_user(&self, key: &str) -> Result<Option<UserDocument>, StoreError> {
        match self.read_document(key)? {
            Some(document) => Ok(Some(UserDocument::from_document(document)?)),
            None => Ok(None),
        }
    }
}

/// Array-union append on a raw document
pub(crate) fn array_union(
    document: &mut Document,
    key: &str,
    field: &str,
    record: Value,
) -> Result<(), StoreError> {
    let entry = document
        .entry(field.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));

    let items = entry.as_array_mut().ok_or_else(|| StoreError::NotAnArray {
        key: key.to_string(),
        field: field.to_string(),
    })?;

    if !items.contains(&record) {
        items.push(record);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_union_creates_field() {
        let mut document = Document::new();
        array_union(&mut document, "u1", "items", json!({"a": 1})).unwrap();
        assert_eq!(document["items"], json!([{"a": 1}]));
    }

    #[test]
    fn test_array_union_skips_duplicates() {
        let mut document = Document::new();
        array_union(&mut document, "u1", "items", json!(1)).unwrap();
        array_union(&mut document, "u1", "items", json!(2)).unwrap();
        array_union(&mut document, "u1", "items", json!(1)).unwrap();
        assert_eq!(document["items"], json!([1, 2]));
    }

    #[test]
    fn test_array_union_rejects_scalar_field() {
        let mut document = Document::new();
        document.insert("email".to_string(), json!("a@b.c"));
        let err = array_union(&mut document, "u1", "email", json!(1)).unwrap_err();
        assert!(matches!(err, StoreError::NotAnArray { .. }));
    }
}
