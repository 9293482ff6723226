use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::Utc;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::document::{
    from_json_object, DocValue, Document, Filter, Limit, STORE_ID_FIELD,
};
use crate::domain::errors::DomainError;
use crate::domain::ports::DocumentStore;

/// Process-local document store, kept in insertion order per collection.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: Mutex<BTreeMap<String, Vec<Document>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents held in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .map(|c| c.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Vec<Document>>>, DomainError> {
        self.collections
            .lock()
            .map_err(|e| DomainError::Store(e.to_string()))
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn insert(&self, collection: &str, document: Map<String, Value>) -> Result<String, DomainError> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let mut doc = from_json_object(document);
        doc.insert(STORE_ID_FIELD.to_string(), DocValue::ObjectId(id));
        doc.insert("created_at".to_string(), DocValue::Timestamp(now));
        doc.insert("updated_at".to_string(), DocValue::Timestamp(now));

        self.lock()?
            .entry(collection.to_string())
            .or_default()
            .push(doc);
        Ok(id.to_string())
    }

    fn query(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Limit,
    ) -> Result<Vec<Document>, DomainError> {
        let guard = self.lock()?;
        let Some(docs) = guard.get(collection) else {
            return Ok(vec![]);
        };
        Ok(docs
            .iter()
            .filter(|d| filter.matches(d))
            .take(limit.get() as usize)
            .cloned()
            .collect())
    }

    fn collections(&self, max: usize) -> Result<Vec<String>, DomainError> {
        Ok(self.lock()?.keys().take(max).cloned().collect())
    }

    fn disconnect_reason(&self) -> Option<String> {
        None
    }
}
