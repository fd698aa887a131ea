use axum::{Json, extract::State};
use barberbook_core::{
    models::{
        MessageResponse,
        work_schedule::{
            UpdateWorkDayRequest, WorkDayEnvelope, WorkDayResponse, WorkScheduleResponse,
        },
    },
    work_schedule,
};
use serde_json::Value;
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{
        auth::CurrentActor,
        error_handling::AppError,
        extract::{AppJson, AppPath},
    },
};

#[axum::debug_handler]
pub async fn list_work_schedule(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<WorkScheduleResponse>, AppError> {
    let days = work_schedule::list_all(state.store.as_ref()).await?;

    Ok(Json(WorkScheduleResponse {
        message: None,
        work_schedule: days.into_iter().map(WorkDayResponse::from).collect(),
    }))
}

/// Replaces the whole week. The body stays raw JSON so shape errors come back
/// as validation messages instead of extractor rejections.
#[axum::debug_handler]
pub async fn replace_work_schedule(
    State(state): State<Arc<ApiState>>,
    actor: CurrentActor,
    AppJson(payload): AppJson<Value>,
) -> Result<Json<WorkScheduleResponse>, AppError> {
    let days = work_schedule::replace_all(state.store.as_ref(), actor.actor(), &payload).await?;

    Ok(Json(WorkScheduleResponse {
        message: Some("Work schedule updated successfully".to_string()),
        work_schedule: days.into_iter().map(WorkDayResponse::from).collect(),
    }))
}

#[axum::debug_handler]
pub async fn update_work_day(
    State(state): State<Arc<ApiState>>,
    actor: CurrentActor,
    AppPath(day_of_week): AppPath<i32>,
    AppJson(payload): AppJson<UpdateWorkDayRequest>,
) -> Result<Json<WorkDayEnvelope>, AppError> {
    let day =
        work_schedule::upsert_day(state.store.as_ref(), actor.actor(), day_of_week, payload)
            .await?;

    Ok(Json(WorkDayEnvelope {
        message: format!("Work schedule for {} updated successfully", day.day_name()),
        schedule: day.into(),
    }))
}

#[axum::debug_handler]
pub async fn delete_work_day(
    State(state): State<Arc<ApiState>>,
    actor: CurrentActor,
    AppPath(day_of_week): AppPath<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    work_schedule::delete_day(state.store.as_ref(), actor.actor(), day_of_week).await?;

    Ok(Json(MessageResponse {
        message: "Work schedule entry deleted successfully".to_string(),
    }))
}
