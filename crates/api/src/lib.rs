//! # BarberBook API
//!
//! The web server for the BarberBook booking backend: appointments, availability,
//! finance reports, the work schedule, the service catalog and client accounts,
//! all as JSON under `/api`.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate HTTP requests into calls on the core services
//! - **Middleware**: Sessions, the actor extractor and error mapping
//! - **Config**: Environment configuration
//!
//! Handlers only see the [`BookingStore`] trait; [`start_server`] wires in the
//! Postgres store while tests use the in-memory one.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Sessions, actor extraction and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use barberbook_core::{directory, store::BookingStore};
use barberbook_db::{DbPool, PgStore};
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::middleware::auth::SessionStore;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Persistence behind every core operation
    pub store: Arc<dyn BookingStore>,
    /// Bearer tokens issued by login
    pub sessions: SessionStore,
}

impl ApiState {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self {
            store,
            sessions: SessionStore::new(),
        }
    }
}

/// Builds the router with every endpoint attached to `state`.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Booking and availability endpoints
        .merge(routes::appointment::routes())
        // Revenue reports
        .merge(routes::finance::routes())
        // Opening hours
        .merge(routes::work_schedule::routes())
        // Service catalog
        .merge(routes::service::routes())
        // Client accounts and sessions
        .merge(routes::user::routes())
        .merge(routes::auth::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin {origin}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true))
}

/// Starts the API server with the provided configuration and database connection
///
/// Installs logging, seeds the administrator account, then serves until the
/// listener fails.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = barberbook_api::config::ApiConfig::from_env()?;
/// let db_pool =
///     barberbook_db::create_pool(&config.database_url, config.db_max_connections).await?;
/// barberbook_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store: Arc<dyn BookingStore> = Arc::new(PgStore::new(db_pool));
    directory::ensure_admin(
        store.as_ref(),
        &config.admin_username,
        &config.admin_password,
    )
    .await
    .wrap_err("Failed to seed the administrator account")?;

    let state = Arc::new(ApiState::new(store));
    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    // Add request timeout middleware
    let app = app.layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)));

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
