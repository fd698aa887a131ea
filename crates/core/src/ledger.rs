//! # Appointment Ledger
//!
//! Creates, reschedules and removes appointments, and decides who may see them.
//!
//! A slot is a `(date, time)` pair and holds at most one appointment, whatever its
//! client, service or status. The ledger checks the slot before booking so callers
//! get a clean `Conflict`; the store's own uniqueness rule closes the window between
//! that check and the insert.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    auth::{ensure_owner_or_admin, require_admin},
    errors::{BookingError, BookingResult},
    models::{
        appointment::{
            Appointment, AppointmentDetails, AppointmentStatus, BookingClient,
            CreateAppointmentRequest, NewAppointment, UpdateAppointmentRequest,
        },
        client::{Actor, NewClient, Role},
    },
    store::BookingStore,
    validation::{DATE_FORMAT, parse_date, parse_id, parse_time, require_field},
};

/// Credential given to clients created by a booking.
pub const WALK_IN_DEFAULT_PASSWORD: &str = "123456";

pub const SLOT_TAKEN: &str = "An appointment already exists at this time";

/// Books a slot, creating the client on the fly when no existing client matches.
///
/// Clients are matched by `client_email` first, then by `client_phone`. A walk-in
/// gets the phone number as username, suffixed `_1`, `_2`, ... until it is free.
///
/// # Errors
///
/// * `BookingError::Validation` - a required field is missing or malformed
/// * `BookingError::NotFound` - the service does not exist
/// * `BookingError::Conflict` - the slot is already booked
pub async fn create_appointment(
    store: &dyn BookingStore,
    request: CreateAppointmentRequest,
) -> BookingResult<AppointmentDetails> {
    let client_name = require_field("client_name", request.client_name.as_deref())?;
    let client_phone = require_field("client_phone", request.client_phone.as_deref())?;
    let service_id = require_field("service_id", request.service_id.as_deref())?;
    let date = require_field("date", request.date.as_deref())?;
    let time = require_field("time", request.time.as_deref())?;

    let service_id = parse_id("service_id", service_id)?;
    parse_date(date)?;
    parse_time(time)?;

    let service = store
        .find_service(service_id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Service with ID {service_id} not found")))?;

    let client_email = request.client_email.as_deref().filter(|email| !email.is_empty());
    let client = resolve_client(store, client_name, client_phone, client_email).await?;

    if store.find_appointment_by_slot(date, time).await?.is_some() {
        warn!("Rejected booking for taken slot {} {}", date, time);
        return Err(BookingError::Conflict(SLOT_TAKEN.to_string()));
    }

    let appointment = store
        .book_appointment(
            client,
            NewAppointment {
                service_id: service.id,
                date: date.to_string(),
                time: time.to_string(),
            },
        )
        .await?;

    info!(
        "Booked appointment {} for {} {} (client {})",
        appointment.id, appointment.date, appointment.time, appointment.client_id
    );

    let client = store.find_client(appointment.client_id).await?;
    Ok(AppointmentDetails::new(
        appointment,
        client.as_ref(),
        Some(&service),
    ))
}

/// Finds the client a booking belongs to, or describes the walk-in to create.
pub async fn resolve_client(
    store: &dyn BookingStore,
    name: &str,
    phone: &str,
    email: Option<&str>,
) -> BookingResult<BookingClient> {
    if let Some(email) = email {
        if let Some(client) = store.find_client_by_email(email).await? {
            debug!("Booking matched client {} by email", client.id);
            return Ok(BookingClient::Existing(client.id));
        }
    }

    if let Some(client) = store.find_client_by_phone(phone).await? {
        debug!("Booking matched client {} by phone", client.id);
        return Ok(BookingClient::Existing(client.id));
    }

    let username = next_free_username(store, phone).await?;
    debug!("Booking creates walk-in client {}", username);

    Ok(BookingClient::WalkIn(NewClient {
        username,
        name: name.to_string(),
        phone: phone.to_string(),
        email: email.map(str::to_string),
        role: Role::Client,
        password: WALK_IN_DEFAULT_PASSWORD.to_string(),
    }))
}

/// `base`, or the first of `base_1`, `base_2`, ... that no client uses yet.
pub async fn next_free_username(store: &dyn BookingStore, base: &str) -> BookingResult<String> {
    let mut candidate = base.to_string();
    let mut counter = 1;
    while store.find_client_by_username(&candidate).await?.is_some() {
        candidate = format!("{base}_{counter}");
        counter += 1;
    }
    Ok(candidate)
}

/// Sets the status of an appointment. Any status may follow any other.
pub async fn update_status(
    store: &dyn BookingStore,
    actor: Option<&Actor>,
    id: Uuid,
    status: Option<&str>,
) -> BookingResult<AppointmentDetails> {
    require_admin(actor)?;

    let mut appointment = find_appointment(store, id).await?;
    appointment.status = status
        .ok_or_else(|| BookingError::required("status"))?
        .parse()?;

    let appointment = store.update_appointment(appointment).await?;
    info!("Appointment {} is now {}", appointment.id, appointment.status);

    describe(store, appointment).await
}

/// Applies a partial update. Every supplied field is validated before anything is
/// written. Moving onto a booked slot fails with `Conflict` from the store.
pub async fn update_appointment(
    store: &dyn BookingStore,
    actor: Option<&Actor>,
    id: Uuid,
    request: UpdateAppointmentRequest,
) -> BookingResult<AppointmentDetails> {
    require_admin(actor)?;

    let mut appointment = find_appointment(store, id).await?;

    if let Some(service_id) = request.service_id {
        let service_id = parse_id("service_id", &service_id)?;
        store.find_service(service_id).await?.ok_or_else(|| {
            BookingError::NotFound(format!("Service with ID {service_id} not found"))
        })?;
        appointment.service_id = service_id;
    }
    if let Some(date) = request.date {
        parse_date(&date)?;
        appointment.date = date;
    }
    if let Some(time) = request.time {
        parse_time(&time)?;
        appointment.time = time;
    }
    if let Some(status) = request.status {
        appointment.status = status.parse::<AppointmentStatus>()?;
    }

    let appointment = store.update_appointment(appointment).await?;
    info!("Updated appointment {}", appointment.id);

    describe(store, appointment).await
}

/// Hard delete. Deleting an id twice reports `NotFound` the second time.
pub async fn delete_appointment(
    store: &dyn BookingStore,
    actor: Option<&Actor>,
    id: Uuid,
) -> BookingResult<()> {
    require_admin(actor)?;

    if !store.delete_appointment(id).await? {
        return Err(appointment_not_found(id));
    }

    info!("Deleted appointment {}", id);
    Ok(())
}

/// A client's appointments, newest first. Visible to admins and to the client.
pub async fn list_by_client(
    store: &dyn BookingStore,
    actor: Option<&Actor>,
    client_id: Uuid,
) -> BookingResult<Vec<AppointmentDetails>> {
    ensure_owner_or_admin(actor, client_id)?;

    let appointments = store.list_appointments_by_client(client_id).await?;
    describe_all(store, appointments).await
}

pub async fn get_by_id(
    store: &dyn BookingStore,
    actor: Option<&Actor>,
    id: Uuid,
) -> BookingResult<AppointmentDetails> {
    let appointment = find_appointment(store, id).await?;
    ensure_owner_or_admin(actor, appointment.client_id)?;

    describe(store, appointment).await
}

pub async fn list_all(
    store: &dyn BookingStore,
    actor: Option<&Actor>,
) -> BookingResult<Vec<AppointmentDetails>> {
    require_admin(actor)?;

    let appointments = store.list_appointments().await?;
    describe_all(store, appointments).await
}

/// Appointments on `today`, earliest first.
pub async fn list_today(
    store: &dyn BookingStore,
    actor: Option<&Actor>,
    today: NaiveDate,
) -> BookingResult<Vec<AppointmentDetails>> {
    require_admin(actor)?;

    let today = today.format(DATE_FORMAT).to_string();
    let appointments = store.list_appointments_by_date(&today).await?;
    describe_all(store, appointments).await
}

/// Joins one appointment with its client and service.
pub async fn describe(
    store: &dyn BookingStore,
    appointment: Appointment,
) -> BookingResult<AppointmentDetails> {
    let client = store.find_client(appointment.client_id).await?;
    let service = store.find_service(appointment.service_id).await?;
    Ok(AppointmentDetails::new(
        appointment,
        client.as_ref(),
        service.as_ref(),
    ))
}

/// Joins a batch of appointments, loading each referenced record once.
pub async fn describe_all(
    store: &dyn BookingStore,
    appointments: Vec<Appointment>,
) -> BookingResult<Vec<AppointmentDetails>> {
    let services: HashMap<_, _> = store
        .list_services()
        .await?
        .into_iter()
        .map(|service| (service.id, service))
        .collect();

    let mut clients = HashMap::new();
    for appointment in &appointments {
        if !clients.contains_key(&appointment.client_id) {
            let client = store.find_client(appointment.client_id).await?;
            clients.insert(appointment.client_id, client);
        }
    }

    Ok(appointments
        .into_iter()
        .map(|appointment| {
            let client = clients.get(&appointment.client_id).and_then(Option::as_ref);
            let service = services.get(&appointment.service_id);
            AppointmentDetails::new(appointment, client, service)
        })
        .collect())
}

async fn find_appointment(store: &dyn BookingStore, id: Uuid) -> BookingResult<Appointment> {
    store
        .find_appointment(id)
        .await?
        .ok_or_else(|| appointment_not_found(id))
}

fn appointment_not_found(id: Uuid) -> BookingError {
    BookingError::NotFound(format!("Appointment with ID {id} not found"))
}
