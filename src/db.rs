use std::time::Duration;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

/// How long startup and checkouts wait for a connection before giving up.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Build a pool, failing if no connection can be opened within
/// [`CONNECT_TIMEOUT`].
pub fn create_pool(database_url: &str) -> Result<DbPool, r2d2::Error> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .connection_timeout(CONNECT_TIMEOUT)
        .build(manager)
}
