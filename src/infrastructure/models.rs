use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::document::{from_json_object, DocValue, Document, STORE_ID_FIELD};
use crate::schema::documents;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentRow {
    pub id: Uuid,
    pub collection: String,
    pub body: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = documents)]
pub struct NewDocumentRow {
    pub collection: String,
    pub body: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        let mut doc = match row.body {
            Value::Object(map) => from_json_object(map),
            other => {
                let mut doc = Document::new();
                doc.insert("body".to_string(), DocValue::Json(other));
                doc
            }
        };
        doc.insert(STORE_ID_FIELD.to_string(), DocValue::ObjectId(row.id));
        doc.insert("created_at".to_string(), DocValue::Timestamp(row.created_at));
        doc.insert("updated_at".to_string(), DocValue::Timestamp(row.updated_at));
        doc
    }
}
