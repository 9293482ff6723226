use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::order_service::{SharedOrderService, StoreStatus};
use crate::config::Settings;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnvFlags {
    #[serde(rename = "DATABASE_URL")]
    pub database_url: bool,
    #[serde(rename = "DATABASE_NAME")]
    pub database_name: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DiagnosticsResponse {
    pub backend: String,
    pub database: String,
    pub collections: Vec<String>,
    pub env: EnvFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_error: Option<String>,
}

/// GET /
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is running", body = MessageResponse)),
    tag = "health"
)]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse {
        message: "Order intake backend is running".to_string(),
    })
}

/// GET /test
///
/// Probes the store on every call. Always answers 200; problems are reported
/// in `database_error`.
#[utoipa::path(
    get,
    path = "/test",
    responses((status = 200, description = "Backend and database status", body = DiagnosticsResponse)),
    tag = "health"
)]
pub async fn diagnostics(
    service: web::Data<SharedOrderService>,
    settings: web::Data<Settings>,
) -> HttpResponse {
    let env = settings.env_presence();
    let mut body = DiagnosticsResponse {
        backend: "ok".to_string(),
        database: "disconnected".to_string(),
        collections: vec![],
        env: EnvFlags {
            database_url: env.database_url,
            database_name: env.database_name,
        },
        database_error: None,
    };

    match web::block(move || service.probe_store()).await {
        Ok(StoreStatus::Connected { collections }) => {
            body.database = "connected".to_string();
            body.collections = collections;
        }
        Ok(StoreStatus::Disconnected { reason }) => body.database_error = Some(reason),
        Ok(StoreStatus::Unreachable { error }) => {
            body.database = "unreachable".to_string();
            body.database_error = Some(error);
        }
        Err(e) => body.database_error = Some(e.to_string()),
    }

    HttpResponse::Ok().json(body)
}
