use axum::{Json, extract::State, http::StatusCode};
use barberbook_core::{
    catalog,
    models::{
        MessageResponse,
        service::{
            CreateServiceRequest, ServiceListResponse, ServiceResponse, UpdateServiceRequest,
        },
    },
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{
        auth::CurrentActor,
        error_handling::AppError,
        extract::{AppJson, AppPath},
    },
};

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ServiceListResponse>, AppError> {
    let services = catalog::list_services(state.store.as_ref()).await?;
    Ok(Json(ServiceListResponse { services }))
}

#[axum::debug_handler]
pub async fn get_service(
    State(state): State<Arc<ApiState>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ServiceResponse>, AppError> {
    let service = catalog::get_service(state.store.as_ref(), id).await?;
    Ok(Json(ServiceResponse {
        message: None,
        service,
    }))
}

#[axum::debug_handler]
pub async fn create_service(
    State(state): State<Arc<ApiState>>,
    actor: CurrentActor,
    AppJson(payload): AppJson<CreateServiceRequest>,
) -> Result<(StatusCode, Json<ServiceResponse>), AppError> {
    let service = catalog::create_service(state.store.as_ref(), actor.actor(), payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ServiceResponse {
            message: Some("Service created successfully".to_string()),
            service,
        }),
    ))
}

#[axum::debug_handler]
pub async fn update_service(
    State(state): State<Arc<ApiState>>,
    actor: CurrentActor,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateServiceRequest>,
) -> Result<Json<ServiceResponse>, AppError> {
    let service =
        catalog::update_service(state.store.as_ref(), actor.actor(), id, payload).await?;

    Ok(Json(ServiceResponse {
        message: Some("Service updated successfully".to_string()),
        service,
    }))
}

#[axum::debug_handler]
pub async fn delete_service(
    State(state): State<Arc<ApiState>>,
    actor: CurrentActor,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    catalog::delete_service(state.store.as_ref(), actor.actor(), id).await?;

    Ok(Json(MessageResponse {
        message: "Service deleted successfully".to_string(),
    }))
}
