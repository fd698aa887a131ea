use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/services",
            get(handlers::service::list_services).post(handlers::service::create_service),
        )
        .route(
            "/api/services/:id",
            get(handlers::service::get_service)
                .put(handlers::service::update_service)
                .delete(handlers::service::delete_service),
        )
}
