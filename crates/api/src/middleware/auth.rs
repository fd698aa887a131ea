//! # Authentication Module
//!
//! Login hands out an opaque bearer token. Tokens live in an in-process
//! [`SessionStore`] and are resolved back to an [`Actor`] by the [`CurrentActor`]
//! extractor on every request. A missing or unknown token is not an error here;
//! the guarded operation decides whether it needs an actor.

use std::{collections::HashMap, convert::Infallible, sync::Arc};

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use barberbook_core::models::client::Actor;
use rand::{
    distributions::{Alphanumeric, DistString},
    thread_rng,
};
use tokio::sync::RwLock;
use tracing::debug;

use crate::ApiState;

const TOKEN_LENGTH: usize = 48;

/// Active sessions keyed by bearer token.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Actor>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session for `actor` and returns its token.
    pub async fn create(&self, actor: Actor) -> String {
        let token = Alphanumeric.sample_string(&mut thread_rng(), TOKEN_LENGTH);
        self.sessions.write().await.insert(token.clone(), actor);
        debug!("Opened session for {}", actor.id);
        token
    }

    pub async fn resolve(&self, token: &str) -> Option<Actor> {
        self.sessions.read().await.get(token).copied()
    }

    /// Returns `false` when the token was not an open session.
    pub async fn revoke(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// The requester, when the request carries a live session token.
#[derive(Debug, Clone, Copy)]
pub struct CurrentActor(pub Option<Actor>);

impl CurrentActor {
    pub fn actor(&self) -> Option<&Actor> {
        self.0.as_ref()
    }
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for CurrentActor {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let actor = match bearer_token(&parts.headers) {
            Some(token) => state.sessions.resolve(token).await,
            None => None,
        };
        Ok(CurrentActor(actor))
    }
}
