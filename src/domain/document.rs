use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::errors::DomainError;

/// Name of the store-assigned identifier field on a stored document.
pub const STORE_ID_FIELD: &str = "_id";

/// Name of the identifier field exposed to API clients.
pub const API_ID_FIELD: &str = "id";

/// A single value inside a stored document.
///
/// Store-specific values (identifiers and points in time) are kept typed so the
/// response normalizer can render them; everything else is plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DocValue {
    ObjectId(Uuid),
    Timestamp(DateTime<Utc>),
    Json(Value),
}

/// A document as read back from a collection.
pub type Document = BTreeMap<String, DocValue>;

/// Serialize any entity into the object shape a collection accepts.
pub fn to_document<T: Serialize>(entity: &T) -> Result<Map<String, Value>, DomainError> {
    match serde_json::to_value(entity)? {
        Value::Object(map) => Ok(map),
        other => Err(DomainError::Store(format!(
            "Document must be a JSON object, got {other}"
        ))),
    }
}

/// Lift a JSON object into a [`Document`] with every value untyped.
pub fn from_json_object(map: Map<String, Value>) -> Document {
    map.into_iter().map(|(k, v)| (k, DocValue::Json(v))).collect()
}

/// Convert a stored document into its API form.
///
/// `_id` becomes a string `id`, timestamps become ISO-8601 text and all other
/// fields pass through. The input is left untouched.
pub fn normalize(doc: &Document) -> Document {
    let mut out = Document::new();
    for (key, value) in doc {
        let value = match value {
            DocValue::ObjectId(id) => DocValue::Json(Value::String(id.to_string())),
            DocValue::Timestamp(ts) => DocValue::Json(Value::String(ts.to_rfc3339())),
            DocValue::Json(v) => DocValue::Json(v.clone()),
        };
        if key == STORE_ID_FIELD {
            out.insert(API_ID_FIELD.to_string(), value);
        } else {
            out.insert(key.clone(), value);
        }
    }
    out
}

/// Exact-equality filter over top-level document fields. Empty matches all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Map<String, Value>);

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut map = Map::new();
        map.insert(field.into(), value.into());
        Self(map)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.0
            .iter()
            .all(|(k, want)| matches!(doc.get(k), Some(DocValue::Json(v)) if v == want))
    }
}

/// Maximum number of documents returned by one query, within `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "i64")]
pub struct Limit(i64);

impl Limit {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 100;
    pub const DEFAULT: i64 = 25;

    pub fn get(self) -> i64 {
        self.0
    }
}

impl Default for Limit {
    fn default() -> Self {
        Limit(Self::DEFAULT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitOutOfRange(pub i64);

impl fmt::Display for LimitOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "limit must be between {} and {}, got {}",
            Limit::MIN,
            Limit::MAX,
            self.0
        )
    }
}

impl TryFrom<i64> for Limit {
    type Error = LimitOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Limit(value))
        } else {
            Err(LimitOutOfRange(value))
        }
    }
}
