use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::errors::DomainError;
use super::mobile::canonical_mobile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cod,
    Upi,
}

// ── Inbound payload ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct OrderItemPayload {
    #[validate(length(min = 1, message = "Item name must not be empty"))]
    pub name: String,
    #[validate(range(min = 0, message = "Price must be at least 0"))]
    pub price: i64,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub qty: i64,
}

/// Order as submitted by the client, before validation.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct OrderPayload {
    #[validate(length(min = 1, message = "Customer name must not be empty"))]
    pub customer_name: String,
    /// Free-form phone number; must contain exactly 10 digits.
    #[validate(custom(function = "super::mobile::validate_mobile"))]
    pub customer_mobile: String,
    #[validate(nested)]
    pub items: Vec<OrderItemPayload>,
    #[validate(range(min = 0, message = "Subtotal must be at least 0"))]
    pub subtotal: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "Discount must be at least 0"))]
    pub discount: i64,
    #[validate(range(min = 0, message = "Total must be at least 0"))]
    pub total: i64,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub coupon_code: Option<String>,
}

// ── Validated entity ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub price: i64,
    pub qty: i64,
}

/// A validated order. `customer_mobile` is always exactly ten ASCII digits.
///
/// Amounts are not reconciled against each other; `total` is taken as sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub customer_name: String,
    pub customer_mobile: String,
    pub items: Vec<OrderItem>,
    pub subtotal: i64,
    pub discount: i64,
    pub total: i64,
    pub payment_method: PaymentMethod,
    pub coupon_code: Option<String>,
}

impl Order {
    /// Collection the order documents live in.
    pub const COLLECTION: &'static str = "order";
}

impl TryFrom<OrderPayload> for Order {
    type Error = DomainError;

    fn try_from(payload: OrderPayload) -> Result<Self, Self::Error> {
        payload.validate()?;
        let customer_mobile = canonical_mobile(&payload.customer_mobile)
            .map_err(|e| DomainError::Validation(format!("customer_mobile: {e}")))?;

        Ok(Order {
            customer_name: payload.customer_name,
            customer_mobile,
            items: payload
                .items
                .into_iter()
                .map(|i| OrderItem {
                    name: i.name,
                    price: i.price,
                    qty: i.qty,
                })
                .collect(),
            subtotal: payload.subtotal,
            discount: payload.discount,
            total: payload.total,
            payment_method: payload.payment_method,
            coupon_code: payload.coupon_code,
        })
    }
}
