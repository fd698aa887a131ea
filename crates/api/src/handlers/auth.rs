use axum::{Json, extract::State, http::HeaderMap};
use barberbook_core::{
    directory,
    errors::BookingError,
    models::{
        MessageResponse,
        client::{ClientResponse, LoginRequest, LoginResponse},
    },
};
use std::sync::Arc;
use tracing::info;

use crate::{
    ApiState,
    middleware::{
        auth::{CurrentActor, bearer_token},
        error_handling::AppError,
        extract::AppJson,
    },
};

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = directory::authenticate(
        state.store.as_ref(),
        payload.username.as_deref(),
        payload.password.as_deref(),
    )
    .await?;

    let token = state.sessions.create(user.actor()).await;
    info!("User {} logged in", user.username);

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user,
    }))
}

#[axum::debug_handler]
pub async fn logout(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, AppError> {
    let token = bearer_token(&headers)
        .ok_or_else(|| BookingError::Authentication("Authentication required".to_string()))?;

    if !state.sessions.revoke(token).await {
        return Err(BookingError::Authentication("Session is not active".to_string()).into());
    }

    Ok(Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    }))
}

#[axum::debug_handler]
pub async fn me(
    State(state): State<Arc<ApiState>>,
    actor: CurrentActor,
) -> Result<Json<ClientResponse>, AppError> {
    let user = directory::current_client(state.store.as_ref(), actor.actor()).await?;
    Ok(Json(ClientResponse {
        message: None,
        user,
    }))
}
