use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/finance/daily", get(handlers::finance::daily_revenue))
        .route("/api/finance/monthly", get(handlers::finance::monthly_revenue))
        .route("/api/finance/annual", get(handlers::finance::annual_revenue))
        .route("/api/finance/summary", get(handlers::finance::summary))
}
