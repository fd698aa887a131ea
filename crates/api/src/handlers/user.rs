use axum::{Json, extract::State, http::StatusCode};
use barberbook_core::{
    directory,
    models::{
        MessageResponse,
        client::{ClientListResponse, ClientResponse, RegisterClientRequest, UpdateClientRequest},
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
pub async fn register(
    State(state): State<Arc<ApiState>>,
    actor: CurrentActor,
    AppJson(payload): AppJson<RegisterClientRequest>,
) -> Result<(StatusCode, Json<ClientResponse>), AppError> {
    let user = directory::register(state.store.as_ref(), actor.actor(), payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ClientResponse {
            message: Some("User registered successfully".to_string()),
            user,
        }),
    ))
}

#[axum::debug_handler]
pub async fn list_users(
    State(state): State<Arc<ApiState>>,
    actor: CurrentActor,
) -> Result<Json<ClientListResponse>, AppError> {
    let users = directory::list_clients(state.store.as_ref(), actor.actor()).await?;
    Ok(Json(ClientListResponse { users }))
}

#[axum::debug_handler]
pub async fn get_user(
    State(state): State<Arc<ApiState>>,
    actor: CurrentActor,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ClientResponse>, AppError> {
    let user = directory::get_client(state.store.as_ref(), actor.actor(), id).await?;
    Ok(Json(ClientResponse {
        message: None,
        user,
    }))
}

#[axum::debug_handler]
pub async fn update_user(
    State(state): State<Arc<ApiState>>,
    actor: CurrentActor,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateClientRequest>,
) -> Result<Json<ClientResponse>, AppError> {
    let user = directory::update_client(state.store.as_ref(), actor.actor(), id, payload).await?;

    Ok(Json(ClientResponse {
        message: Some("User updated successfully".to_string()),
        user,
    }))
}

#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<Arc<ApiState>>,
    actor: CurrentActor,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    directory::delete_client(state.store.as_ref(), actor.actor(), id).await?;

    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}
