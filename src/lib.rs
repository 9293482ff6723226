pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::order_service::{OrderService, SharedOrderService};
use crate::config::Settings;
use crate::domain::ports::DocumentStore;
use crate::errors::AppError;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::root,
        handlers::health::diagnostics,
        handlers::orders::create_order,
        handlers::orders::list_orders,
    ),
    tags(
        (name = "health", description = "Liveness and diagnostics"),
        (name = "orders", description = "Order intake"),
    )
)]
pub struct ApiDoc;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(
    pool: &DbPool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

/// Wrap a store handle in the service shared by all workers.
pub fn order_service(store: Arc<dyn DocumentStore>) -> web::Data<SharedOrderService> {
    web::Data::new(OrderService::new(store))
}

/// Register routes and extractor error handling.
///
/// Malformed JSON bodies and query strings are answered with 422 and a
/// `detail` message, the same shape as validation failures.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::Validation(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::Validation(err.to_string()).into()
    }))
    .route("/", web::get().to(handlers::health::root))
    .route("/test", web::get().to(handlers::health::diagnostics))
    .service(
        web::resource("/orders")
            .route(web::post().to(handlers::orders::create_order))
            .route(web::get().to(handlers::orders::list_orders)),
    );
}

/// Build and return an actix-web `Server` bound to the configured address.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    service: web::Data<SharedOrderService>,
    settings: Settings,
) -> std::io::Result<actix_web::dev::Server> {
    let bind = (settings.host.clone(), settings.port);
    let settings = web::Data::new(settings);

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .app_data(settings.clone())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .configure(configure)
    })
    .bind(bind)?
    .run())
}
