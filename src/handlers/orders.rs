use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::order_service::SharedOrderService;
use crate::domain::document::Limit;
use crate::domain::order::OrderPayload;
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateOrderResponse {
    pub id: String,
    pub message: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListOrdersParams {
    /// Customer mobile number in any format; only its digits are compared.
    pub mobile: Option<String>,
    /// Maximum number of orders to return, 1 to 100. Defaults to 25.
    #[serde(default)]
    #[param(value_type = Option<i64>, minimum = 1, maximum = 100)]
    pub limit: Limit,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Validates the order, normalises the customer's mobile number and stores it.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = OrderPayload,
    responses(
        (status = 200, description = "Order created", body = CreateOrderResponse),
        (status = 422, description = "Order failed validation"),
        (status = 500, description = "Order could not be stored"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<SharedOrderService>,
    body: web::Json<OrderPayload>,
) -> Result<HttpResponse, AppError> {
    let payload = body.into_inner();

    let id = web::block(move || service.create_order(payload))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CreateOrderResponse {
        id,
        message: "Order created".to_string(),
    }))
}

/// GET /orders
///
/// Lists stored orders, optionally only those placed with one mobile number.
#[utoipa::path(
    get,
    path = "/orders",
    params(ListOrdersParams),
    responses(
        (status = 200, description = "Orders with string ids and ISO-8601 timestamps"),
        (status = 422, description = "Invalid query parameters"),
        (status = 500, description = "Orders could not be read"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    service: web::Data<SharedOrderService>,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();

    let docs = web::block(move || service.list_orders(params.mobile.as_deref(), params.limit))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(docs))
}
