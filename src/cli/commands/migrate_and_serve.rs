use anyhow::Result;
use tracing::{error, info, trace};

use super::{init_database, serve};

/// Applies pending migrations and then runs the server on the same database.
pub async fn migrate_and_serve(database_url: &str, bind_address: &str) -> Result<()> {
    trace!("Entering migrate_and_serve function");
    info!("Applying database migrations and starting server");

    if let Err(e) = init_database(database_url).await {
        error!("Migrations failed, not starting server: {:#}", e);
        return Err(e);
    }

    serve(database_url, bind_address).await
}
