use std::sync::Arc;

use crate::domain::document::{normalize, to_document, Document, Filter, Limit};
use crate::domain::errors::DomainError;
use crate::domain::mobile::digits_only;
use crate::domain::order::{Order, OrderPayload};
use crate::domain::ports::DocumentStore;

/// Most collection names reported by a store probe.
pub const PROBE_COLLECTIONS: usize = 10;

/// Service over a store handle chosen at startup.
pub type SharedOrderService = OrderService<Arc<dyn DocumentStore>>;

/// Result of probing the document store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreStatus {
    Connected { collections: Vec<String> },
    Disconnected { reason: String },
    Unreachable { error: String },
}

pub struct OrderService<S> {
    store: S,
}

impl<S: DocumentStore> OrderService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate `payload` and persist it as one document.
    ///
    /// Nothing is written when validation fails.
    pub fn create_order(&self, payload: OrderPayload) -> Result<String, DomainError> {
        let order = Order::try_from(payload)?;
        let id = self.store.insert(Order::COLLECTION, to_document(&order)?)?;
        log::info!("Created order {} for {}", id, order.customer_mobile);
        Ok(id)
    }

    /// Orders in API form, optionally restricted to one mobile number.
    ///
    /// The mobile is reduced to its digits but not length-checked; a malformed
    /// number simply matches nothing.
    pub fn list_orders(
        &self,
        mobile: Option<&str>,
        limit: Limit,
    ) -> Result<Vec<Document>, DomainError> {
        let filter = match mobile {
            Some(m) if !m.is_empty() => Filter::eq("customer_mobile", digits_only(m)),
            _ => Filter::all(),
        };
        let docs = self.store.query(Order::COLLECTION, &filter, limit)?;
        Ok(docs.iter().map(normalize).collect())
    }

    pub fn probe_store(&self) -> StoreStatus {
        if let Some(reason) = self.store.disconnect_reason() {
            return StoreStatus::Disconnected { reason };
        }
        match self.store.collections(PROBE_COLLECTIONS) {
            Ok(collections) => StoreStatus::Connected { collections },
            Err(e) => StoreStatus::Unreachable {
                error: e.to_string(),
            },
        }
    }
}
