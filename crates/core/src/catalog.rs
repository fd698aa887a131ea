//! Service catalog: what the shop offers, for how long and at what price.

use tracing::info;
use uuid::Uuid;

use crate::{
    auth::require_admin,
    errors::{BookingError, BookingResult},
    models::{
        client::Actor,
        service::{CreateServiceRequest, NewService, Service, UpdateServiceRequest},
    },
    store::BookingStore,
    validation::require_field,
};

pub async fn list_services(store: &dyn BookingStore) -> BookingResult<Vec<Service>> {
    store.list_services().await
}

pub async fn get_service(store: &dyn BookingStore, id: Uuid) -> BookingResult<Service> {
    store
        .find_service(id)
        .await?
        .ok_or_else(|| service_not_found(id))
}

pub async fn create_service(
    store: &dyn BookingStore,
    actor: Option<&Actor>,
    request: CreateServiceRequest,
) -> BookingResult<Service> {
    require_admin(actor)?;

    let name = require_field("name", request.name.as_deref())?;
    let duration = request.duration.ok_or_else(|| BookingError::required("duration"))?;
    let price = request.price.ok_or_else(|| BookingError::required("price"))?;
    validate_duration(duration)?;
    validate_price(price)?;

    if store.find_service_by_name(name).await?.is_some() {
        return Err(duplicate_name(name));
    }

    let service = store
        .insert_service(NewService {
            name: name.to_string(),
            duration,
            price,
        })
        .await?;

    info!("Created service {} ({})", service.name, service.id);
    Ok(service)
}

pub async fn update_service(
    store: &dyn BookingStore,
    actor: Option<&Actor>,
    id: Uuid,
    request: UpdateServiceRequest,
) -> BookingResult<Service> {
    require_admin(actor)?;

    let mut service = get_service(store, id).await?;

    if let Some(name) = request.name {
        require_field("name", Some(name.as_str()))?;
        if let Some(existing) = store.find_service_by_name(&name).await? {
            if existing.id != id {
                return Err(duplicate_name(&name));
            }
        }
        service.name = name;
    }
    if let Some(duration) = request.duration {
        validate_duration(duration)?;
        service.duration = duration;
    }
    if let Some(price) = request.price {
        validate_price(price)?;
        service.price = price;
    }

    let service = store.update_service(service).await?;
    info!("Updated service {}", service.id);
    Ok(service)
}

/// Services still referenced by appointments cannot be deleted.
pub async fn delete_service(
    store: &dyn BookingStore,
    actor: Option<&Actor>,
    id: Uuid,
) -> BookingResult<()> {
    require_admin(actor)?;

    get_service(store, id).await?;

    let booked = store.count_appointments_for_service(id).await?;
    if booked > 0 {
        return Err(BookingError::Conflict(format!(
            "Service is referenced by {booked} appointment(s)"
        )));
    }

    if !store.delete_service(id).await? {
        return Err(service_not_found(id));
    }

    info!("Deleted service {}", id);
    Ok(())
}

fn validate_duration(duration: i32) -> BookingResult<()> {
    if duration <= 0 {
        return Err(BookingError::Validation(
            "duration must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

fn validate_price(price: f64) -> BookingResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(BookingError::Validation(
            "price must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

fn duplicate_name(name: &str) -> BookingError {
    BookingError::Validation(format!("A service named {name:?} already exists"))
}

fn service_not_found(id: Uuid) -> BookingError {
    BookingError::NotFound(format!("Service with ID {id} not found"))
}
