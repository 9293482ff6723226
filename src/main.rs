use std::sync::Arc;

use dotenvy::dotenv;
use order_intake::config::Settings;
use order_intake::infrastructure::pg_store::PgDocumentStore;
use order_intake::{build_server, order_service};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let settings = Settings::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    // A failed connection is not fatal; order endpoints report it per request.
    let store = PgDocumentStore::connect(&settings);
    let service = order_service(Arc::new(store));

    log::info!("Starting server at http://{}:{}", settings.host, settings.port);

    build_server(service, settings)?.await
}
