//! # Client Directory
//!
//! Registration, credential checks and admin maintenance of client accounts.
//! Walk-in clients created by bookings live here too; see [`crate::ledger`].

use tracing::info;
use uuid::Uuid;

use crate::{
    auth::require_admin,
    errors::{BookingError, BookingResult},
    models::client::{
        Actor, Client, ClientChanges, NewClient, RegisterClientRequest, Role,
        UpdateClientRequest,
    },
    store::BookingStore,
    validation::require_field,
};

/// Creates an account. Only an admin may choose the role; everyone else gets
/// `client` whatever the request says.
pub async fn register(
    store: &dyn BookingStore,
    actor: Option<&Actor>,
    request: RegisterClientRequest,
) -> BookingResult<Client> {
    let username = require_field("username", request.username.as_deref())?;
    let password = require_field("password", request.password.as_deref())?;
    let name = require_field("name", request.name.as_deref())?;
    let phone = require_field("phone", request.phone.as_deref())?;
    let email = request.email.as_deref().filter(|email| !email.is_empty());

    if store.find_client_by_username(username).await?.is_some() {
        return Err(BookingError::Validation("Username already exists".to_string()));
    }
    if let Some(email) = email {
        if store.find_client_by_email(email).await?.is_some() {
            return Err(BookingError::Validation("Email already exists".to_string()));
        }
    }

    let role = match actor {
        Some(actor) if actor.is_admin() => request.role.unwrap_or(Role::Client),
        _ => Role::Client,
    };

    let client = store
        .insert_client(NewClient {
            username: username.to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.map(str::to_string),
            role,
            password: password.to_string(),
        })
        .await?;

    info!("Registered {} {} ({})", client.role, client.username, client.id);
    Ok(client)
}

pub async fn list_clients(
    store: &dyn BookingStore,
    actor: Option<&Actor>,
) -> BookingResult<Vec<Client>> {
    require_admin(actor)?;
    store.list_clients().await
}

pub async fn get_client(
    store: &dyn BookingStore,
    actor: Option<&Actor>,
    id: Uuid,
) -> BookingResult<Client> {
    require_admin(actor)?;
    find_client(store, id).await
}

pub async fn update_client(
    store: &dyn BookingStore,
    actor: Option<&Actor>,
    id: Uuid,
    request: UpdateClientRequest,
) -> BookingResult<Client> {
    require_admin(actor)?;
    find_client(store, id).await?;

    if let Some(username) = &request.username {
        require_field("username", Some(username.as_str()))?;
        if let Some(existing) = store.find_client_by_username(username).await? {
            if existing.id != id {
                return Err(BookingError::Validation("Username already exists".to_string()));
            }
        }
    }
    // An empty email leaves the stored one untouched
    let email = request.email.filter(|email| !email.is_empty());
    if let Some(email) = &email {
        if let Some(existing) = store.find_client_by_email(email).await? {
            if existing.id != id {
                return Err(BookingError::Validation("Email already exists".to_string()));
            }
        }
    }
    if let Some(password) = &request.password {
        require_field("password", Some(password.as_str()))?;
    }

    let client = store
        .update_client(
            id,
            ClientChanges {
                username: request.username,
                name: request.name,
                phone: request.phone,
                email,
                role: request.role,
                password: request.password,
            },
        )
        .await?;

    info!("Updated client {}", client.id);
    Ok(client)
}

/// Clients with appointments on record cannot be deleted.
pub async fn delete_client(
    store: &dyn BookingStore,
    actor: Option<&Actor>,
    id: Uuid,
) -> BookingResult<()> {
    require_admin(actor)?;
    find_client(store, id).await?;

    let booked = store.count_appointments_for_client(id).await?;
    if booked > 0 {
        return Err(BookingError::Conflict(format!(
            "Client is referenced by {booked} appointment(s)"
        )));
    }

    if !store.delete_client(id).await? {
        return Err(client_not_found(id));
    }

    info!("Deleted client {}", id);
    Ok(())
}

/// Checks a username/password pair.
pub async fn authenticate(
    store: &dyn BookingStore,
    username: Option<&str>,
    password: Option<&str>,
) -> BookingResult<Client> {
    let (Some(username), Some(password)) = (
        username.filter(|u| !u.is_empty()),
        password.filter(|p| !p.is_empty()),
    ) else {
        return Err(BookingError::Validation(
            "username and password are required".to_string(),
        ));
    };

    store
        .verify_credentials(username, password)
        .await?
        .ok_or_else(|| BookingError::Authentication("Invalid credentials".to_string()))
}

/// The client behind an authenticated actor.
pub async fn current_client(
    store: &dyn BookingStore,
    actor: Option<&Actor>,
) -> BookingResult<Client> {
    let actor = actor
        .ok_or_else(|| BookingError::Authentication("Authentication required".to_string()))?;
    find_client(store, actor.id).await
}

/// Seeds the administrator account unless that username already exists.
/// Returns `true` when an account was created.
pub async fn ensure_admin(
    store: &dyn BookingStore,
    username: &str,
    password: &str,
) -> BookingResult<bool> {
    if store.find_client_by_username(username).await?.is_some() {
        return Ok(false);
    }

    store
        .insert_client(NewClient {
            username: username.to_string(),
            name: "Administrator".to_string(),
            phone: String::new(),
            email: None,
            role: Role::Admin,
            password: password.to_string(),
        })
        .await?;

    info!("Created default admin account {}", username);
    Ok(true)
}

async fn find_client(store: &dyn BookingStore, id: Uuid) -> BookingResult<Client> {
    store
        .find_client(id)
        .await?
        .ok_or_else(|| client_not_found(id))
}

fn client_not_found(id: Uuid) -> BookingError {
    BookingError::NotFound(format!("Client with ID {id} not found"))
}
