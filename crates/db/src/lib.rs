//! PostgreSQL persistence for BarberBook: pool setup, schema bootstrap, per-table
//! query functions and [`PgStore`], plus the in-memory [`mock::MemoryStore`].

pub mod mock;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod store;

pub use store::PgStore;

use std::time::Duration;

use eyre::{Result, WrapErr};
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};

pub type DbPool = Pool<Postgres>;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a pool holding at most `max_connections` connections.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
        .wrap_err("Failed to connect to the booking database")
}
