use axum::{Json, extract::State, http::StatusCode};
use barberbook_core::{
    availability, ledger,
    models::{
        MessageResponse,
        appointment::{
            AppointmentListResponse, AppointmentResponse, AvailableTimesQuery,
            AvailableTimesResponse, CreateAppointmentRequest, UpdateAppointmentRequest,
            UpdateStatusRequest,
        },
    },
};
use chrono::Local;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{
        auth::CurrentActor,
        error_handling::AppError,
        extract::{AppJson, AppPath, AppQuery},
    },
};

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<AppointmentResponse>), AppError> {
    let appointment = ledger::create_appointment(state.store.as_ref(), payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(AppointmentResponse {
            message: Some("Appointment created successfully".to_string()),
            appointment,
        }),
    ))
}

#[axum::debug_handler]
pub async fn available_times(
    State(state): State<Arc<ApiState>>,
    AppQuery(query): AppQuery<AvailableTimesQuery>,
) -> Result<Json<AvailableTimesResponse>, AppError> {
    let available_times = availability::compute_available_slots(
        state.store.as_ref(),
        query.date.as_deref(),
        query.service_id.as_deref(),
    )
    .await?;

    Ok(Json(AvailableTimesResponse { available_times }))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
    actor: CurrentActor,
) -> Result<Json<AppointmentListResponse>, AppError> {
    let appointments = ledger::list_all(state.store.as_ref(), actor.actor()).await?;
    Ok(Json(AppointmentListResponse { appointments }))
}

#[axum::debug_handler]
pub async fn list_today(
    State(state): State<Arc<ApiState>>,
    actor: CurrentActor,
) -> Result<Json<AppointmentListResponse>, AppError> {
    let today = Local::now().date_naive();
    let appointments = ledger::list_today(state.store.as_ref(), actor.actor(), today).await?;
    Ok(Json(AppointmentListResponse { appointments }))
}

#[axum::debug_handler]
pub async fn list_by_client(
    State(state): State<Arc<ApiState>>,
    actor: CurrentActor,
    AppPath(client_id): AppPath<Uuid>,
) -> Result<Json<AppointmentListResponse>, AppError> {
    let appointments =
        ledger::list_by_client(state.store.as_ref(), actor.actor(), client_id).await?;
    Ok(Json(AppointmentListResponse { appointments }))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    actor: CurrentActor,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let appointment = ledger::get_by_id(state.store.as_ref(), actor.actor(), id).await?;
    Ok(Json(AppointmentResponse {
        message: None,
        appointment,
    }))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<ApiState>>,
    actor: CurrentActor,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateAppointmentRequest>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let appointment =
        ledger::update_appointment(state.store.as_ref(), actor.actor(), id, payload).await?;

    Ok(Json(AppointmentResponse {
        message: Some("Appointment updated successfully".to_string()),
        appointment,
    }))
}

#[axum::debug_handler]
pub async fn update_status(
    State(state): State<Arc<ApiState>>,
    actor: CurrentActor,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateStatusRequest>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let appointment = ledger::update_status(
        state.store.as_ref(),
        actor.actor(),
        id,
        payload.status.as_deref(),
    )
    .await?;

    Ok(Json(AppointmentResponse {
        message: Some("Appointment status updated successfully".to_string()),
        appointment,
    }))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<ApiState>>,
    actor: CurrentActor,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    ledger::delete_appointment(state.store.as_ref(), actor.actor(), id).await?;

    Ok(Json(MessageResponse {
        message: "Appointment deleted successfully".to_string(),
    }))
}
