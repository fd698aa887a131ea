use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/work_schedule",
            get(handlers::work_schedule::list_work_schedule)
                .post(handlers::work_schedule::replace_work_schedule),
        )
        .route(
            "/api/work_schedule/:day",
            put(handlers::work_schedule::update_work_day)
                .delete(handlers::work_schedule::delete_work_day),
        )
}
