use axum::{Json, extract::State};
use barberbook_core::{
    finance,
    models::finance::{
        AnnualQuery, AnnualRevenue, DailyQuery, DailyRevenue, FinanceSummary, MonthlyQuery,
        MonthlyRevenue,
    },
};
use chrono::Local;
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{
        auth::CurrentActor,
        error_handling::AppError,
        extract::AppQuery,
    },
};

#[axum::debug_handler]
pub async fn daily_revenue(
    State(state): State<Arc<ApiState>>,
    actor: CurrentActor,
    AppQuery(query): AppQuery<DailyQuery>,
) -> Result<Json<DailyRevenue>, AppError> {
    let today = Local::now().date_naive();
    let report = finance::daily_revenue(
        state.store.as_ref(),
        actor.actor(),
        query.date.as_deref(),
        today,
    )
    .await?;

    Ok(Json(report))
}

#[axum::debug_handler]
pub async fn monthly_revenue(
    State(state): State<Arc<ApiState>>,
    actor: CurrentActor,
    AppQuery(query): AppQuery<MonthlyQuery>,
) -> Result<Json<MonthlyRevenue>, AppError> {
    let today = Local::now().date_naive();
    let report = finance::monthly_revenue(
        state.store.as_ref(),
        actor.actor(),
        query.year,
        query.month,
        today,
    )
    .await?;

    Ok(Json(report))
}

#[axum::debug_handler]
pub async fn annual_revenue(
    State(state): State<Arc<ApiState>>,
    actor: CurrentActor,
    AppQuery(query): AppQuery<AnnualQuery>,
) -> Result<Json<AnnualRevenue>, AppError> {
    let today = Local::now().date_naive();
    let report =
        finance::annual_revenue(state.store.as_ref(), actor.actor(), query.year, today).await?;

    Ok(Json(report))
}

#[axum::debug_handler]
pub async fn summary(
    State(state): State<Arc<ApiState>>,
    actor: CurrentActor,
) -> Result<Json<FinanceSummary>, AppError> {
    let today = Local::now().date_naive();
    let report = finance::summary(state.store.as_ref(), actor.actor(), today).await?;

    Ok(Json(report))
}
