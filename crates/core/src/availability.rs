//! # Availability Engine
//!
//! Computes the bookable start times for a date.
//!
//! ## Algorithm
//!
//! 1. Build a fixed candidate grid: every 30 minutes from 08:00 up to, but not
//!    including, 18:00 (20 candidates).
//! 2. Collect the times of every appointment already stored for the date. Every
//!    status occupies its slot, `cancelled` included.
//! 3. Return the candidates that are not occupied, in ascending order.
//!
//! The grid ignores the requested service's duration and the configured work
//! schedule, including extended days. The service is only checked for existence.

use std::collections::HashSet;

use tracing::debug;

use crate::{
    errors::{BookingError, BookingResult},
    store::BookingStore,
    validation::{parse_date, parse_id},
};

pub const OPENING_HOUR: u32 = 8;
pub const CLOSING_HOUR: u32 = 18;
pub const SLOT_MINUTES: u32 = 30;

/// Every candidate start time of a day, ascending, formatted `HH:MM`.
pub fn candidate_grid() -> Vec<String> {
    (OPENING_HOUR * 60..CLOSING_HOUR * 60)
        .step_by(SLOT_MINUTES as usize)
        .map(|minutes| format!("{:02}:{:02}", minutes / 60, minutes % 60))
        .collect()
}

/// Removes occupied times from the candidate grid.
pub fn free_slots<'a, I>(occupied: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let occupied: HashSet<&str> = occupied.into_iter().collect();
    candidate_grid()
        .into_iter()
        .filter(|slot| !occupied.contains(slot.as_str()))
        .collect()
}

/// Lists the free start times on `date` for `service_id`.
///
/// # Errors
///
/// * `BookingError::Validation` - a parameter is missing, the date is not
///   `YYYY-MM-DD`, or the service id is malformed
/// * `BookingError::NotFound` - the service does not exist
pub async fn compute_available_slots(
    store: &dyn BookingStore,
    date: Option<&str>,
    service_id: Option<&str>,
) -> BookingResult<Vec<String>> {
    let (date, service_id) = match (date, service_id) {
        (Some(date), Some(service_id)) if !date.is_empty() && !service_id.is_empty() => {
            (date, service_id)
        }
        _ => {
            return Err(BookingError::Validation(
                "date and service_id are required".to_string(),
            ));
        }
    };

    parse_date(date)?;
    let service_id = parse_id("service_id", service_id)?;

    store
        .find_service(service_id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Service with ID {service_id} not found")))?;

    let booked = store.list_appointments_by_date(date).await?;
    let slots = free_slots(booked.iter().map(|appointment| appointment.time.as_str()));

    debug!(
        "Availability for {}: {} booked, {} free",
        date,
        booked.len(),
        slots.len()
    );

    Ok(slots)
}
