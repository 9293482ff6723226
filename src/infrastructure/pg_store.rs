use chrono::Utc;
use diesel::prelude::*;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::config::Settings;
use crate::db::{create_pool, DbPool};
use crate::domain::document::{Document, Filter, Limit};
use crate::domain::errors::DomainError;
use crate::domain::ports::DocumentStore;
use crate::schema::documents;

use super::models::{DocumentRow, NewDocumentRow};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Store(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Store(e.to_string())
    }
}

// ── Store ────────────────────────────────────────────────────────────────────

enum StoreState {
    Connected(DbPool),
    Disconnected(DomainError),
}

/// Document store backed by one JSONB table in PostgreSQL.
///
/// The connection is set up once. If that fails the store stays disconnected
/// and every call returns the startup error without touching the network.
pub struct PgDocumentStore {
    state: StoreState,
}

impl PgDocumentStore {
    /// Connect using `settings` and apply pending migrations.
    pub fn connect(settings: &Settings) -> Self {
        let Some(url) = settings.connection_url() else {
            log::warn!("DATABASE_URL is not set; order storage is unavailable");
            return Self::disconnected(DomainError::NotConfigured(
                "DATABASE_URL is not set".to_string(),
            ));
        };

        let pool = match create_pool(&url) {
            Ok(pool) => pool,
            Err(e) => {
                log::warn!("Failed to connect to the database: {}", e);
                return Self::disconnected(DomainError::Store(format!(
                    "Database connection failed: {e}"
                )));
            }
        };

        if let Err(e) = crate::run_migrations(&pool) {
            log::warn!("Failed to run database migrations: {}", e);
            return Self::disconnected(DomainError::Store(format!(
                "Database migrations failed: {e}"
            )));
        }

        log::info!("Connected to the document store");
        Self::from_pool(pool)
    }

    pub fn from_pool(pool: DbPool) -> Self {
        Self {
            state: StoreState::Connected(pool),
        }
    }

    pub fn disconnected(reason: DomainError) -> Self {
        Self {
            state: StoreState::Disconnected(reason),
        }
    }

    fn pool(&self) -> Result<&DbPool, DomainError> {
        match &self.state {
            StoreState::Connected(pool) => Ok(pool),
            StoreState::Disconnected(reason) => Err(reason.clone()),
        }
    }
}

impl DocumentStore for PgDocumentStore {
    fn insert(&self, collection: &str, document: Map<String, Value>) -> Result<String, DomainError> {
        let mut conn = self.pool()?.get()?;
        let now = Utc::now();

        let id: Uuid = diesel::insert_into(documents::table)
            .values(&NewDocumentRow {
                collection: collection.to_string(),
                body: Value::Object(document),
                created_at: now,
                updated_at: now,
            })
            .returning(documents::id)
            .get_result(&mut conn)?;

        Ok(id.to_string())
    }

    fn query(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Limit,
    ) -> Result<Vec<Document>, DomainError> {
        let mut conn = self.pool()?.get()?;

        let mut query = documents::table
            .filter(documents::collection.eq(collection.to_string()))
            .select(DocumentRow::as_select())
            .into_boxed();
        for (field, value) in filter.as_map() {
            // `body -> field = value` compares whole jsonb values.
            query = query.filter(
                documents::body
                    .retrieve_as_object(field.clone())
                    .eq(value.clone()),
            );
        }

        let rows = query.limit(limit.get()).load(&mut conn)?;
        Ok(rows.into_iter().map(Document::from).collect())
    }

    fn collections(&self, max: usize) -> Result<Vec<String>, DomainError> {
        let mut conn = self.pool()?.get()?;

        let names = documents::table
            .select(documents::collection)
            .distinct()
            .order(documents::collection.asc())
            .limit(max as i64)
            .load::<String>(&mut conn)?;
        Ok(names)
    }

    fn disconnect_reason(&self) -> Option<String> {
        match &self.state {
            StoreState::Connected(_) => None,
            StoreState::Disconnected(reason) => Some(reason.to_string()),
        }
    }
}
