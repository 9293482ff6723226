use std::sync::Arc;

use serde_json::{Map, Value};

use super::document::{Document, Filter, Limit};
use super::errors::DomainError;

/// Create/read access to named collections of schema-free documents.
///
/// Implementations perform no validation of what they are given.
pub trait DocumentStore: Send + Sync + 'static {
    /// Persist one document and return its store-assigned identifier.
    fn insert(&self, collection: &str, document: Map<String, Value>) -> Result<String, DomainError>;

    /// Up to `limit` documents of `collection` matching `filter`, in store order.
    fn query(&self, collection: &str, filter: &Filter, limit: Limit)
        -> Result<Vec<Document>, DomainError>;

    /// Up to `max` collection names. Hits the backend on every call.
    fn collections(&self, max: usize) -> Result<Vec<String>, DomainError>;

    /// Why no backend connection was established at startup, if it failed.
    fn disconnect_reason(&self) -> Option<String>;
}

impl<T: DocumentStore + ?Sized> DocumentStore for Arc<T> {
    fn insert(&self, collection: &str, document: Map<String, Value>) -> Result<String, DomainError> {
        (**self).insert(collection, document)
    }

    fn query(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Limit,
    ) -> Result<Vec<Document>, DomainError> {
        (**self).query(collection, filter, limit)
    }

    fn collections(&self, max: usize) -> Result<Vec<String>, DomainError> {
        (**self).collections(max)
    }

    fn disconnect_reason(&self) -> Option<String> {
        (**self).disconnect_reason()
    }
}
