use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/appointments",
            get(handlers::appointment::list_appointments)
                .post(handlers::appointment::create_appointment),
        )
        .route(
            "/api/appointments/available-times",
            get(handlers::appointment::available_times),
        )
        .route(
            "/api/appointments/today",
            get(handlers::appointment::list_today),
        )
        .route(
            "/api/appointments/client/:id",
            get(handlers::appointment::list_by_client),
        )
        .route(
            "/api/appointments/:id",
            get(handlers::appointment::get_appointment)
                .put(handlers::appointment::update_appointment)
                .delete(handlers::appointment::delete_appointment),
        )
        .route(
            "/api/appointments/:id/status",
            put(handlers::appointment::update_status),
        )
}
