//! BarberBook HTTP server.

use barberbook_api::config::ApiConfig;
use barberbook_db::{create_pool, schema::initialize_database};
use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let config = ApiConfig::from_env().wrap_err("Invalid server configuration")?;

    let db_pool = create_pool(&config.database_url, config.db_max_connections).await?;
    initialize_database(&db_pool)
        .await
        .wrap_err("Failed to initialize the booking schema")?;

    barberbook_api::start_server(config, db_pool).await
}
