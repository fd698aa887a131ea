//! Creates the schema and the administrator account, then exits.

use barberbook_api::config::ApiConfig;
use barberbook_core::directory;
use barberbook_db::{PgStore, create_pool, schema::initialize_database};
use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let config = ApiConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("Connecting to database...");
    let db_pool = create_pool(&config.database_url, config.db_max_connections).await?;

    initialize_database(&db_pool).await?;

    let store = PgStore::new(db_pool);
    let created = directory::ensure_admin(&store, &config.admin_username, &config.admin_password)
        .await
        .wrap_err("Failed to seed the administrator account")?;
    if !created {
        info!("Administrator {} already exists", config.admin_username);
    }

    Ok(())
}
