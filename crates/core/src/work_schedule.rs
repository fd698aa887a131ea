//! # Work Schedule Manager
//!
//! Weekly working hours, one entry per weekday (0 = Monday .. 6 = Sunday). The
//! whole week can be replaced in one call, or a single day patched or removed.

use std::collections::HashSet;

use serde_json::Value;
use tracing::info;

use crate::{
    auth::require_admin,
    errors::{BookingError, BookingResult},
    models::{
        client::Actor,
        work_schedule::{NewWorkDay, UpdateWorkDayRequest, WorkDay, WorkDayChanges},
    },
    store::BookingStore,
    validation::{parse_time, validate_day_of_week},
};

const REQUIRED_FIELDS: [&str; 3] = ["day_of_week", "start_time", "end_time"];

pub async fn list_all(store: &dyn BookingStore) -> BookingResult<Vec<WorkDay>> {
    store.list_work_days().await
}

/// Parses a bulk payload: a JSON array of entries, each carrying `day_of_week`,
/// `start_time` and `end_time`, with an optional `is_extended` flag.
pub fn parse_entries(payload: &Value) -> BookingResult<Vec<NewWorkDay>> {
    let entries = payload.as_array().ok_or_else(|| {
        BookingError::Validation("Work schedule must be a list of entries".to_string())
    })?;

    let mut seen = HashSet::new();
    let mut days = Vec::with_capacity(entries.len());

    for entry in entries {
        let fields = entry.as_object().ok_or_else(|| {
            BookingError::Validation("Work schedule entries must be objects".to_string())
        })?;

        if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !fields.contains_key(**f)) {
            return Err(BookingError::required(missing));
        }

        let day_of_week = fields["day_of_week"]
            .as_i64()
            .and_then(|day| i32::try_from(day).ok())
            .ok_or_else(|| {
                BookingError::Validation("day_of_week must be an integer".to_string())
            })?;
        validate_day_of_week(day_of_week)?;

        if !seen.insert(day_of_week) {
            return Err(BookingError::Validation(format!(
                "day_of_week {day_of_week} appears more than once"
            )));
        }

        let start_time = time_field(&fields["start_time"], "start_time")?;
        let end_time = time_field(&fields["end_time"], "end_time")?;

        let is_extended = match fields.get("is_extended") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(flag)) => *flag,
            Some(_) => {
                return Err(BookingError::Validation(
                    "is_extended must be a boolean".to_string(),
                ));
            }
        };

        days.push(NewWorkDay {
            day_of_week,
            start_time,
            end_time,
            is_extended,
        });
    }

    Ok(days)
}

/// Replaces the whole week. The payload is validated in full before the store is
/// touched, and the store swaps the entries atomically, so a bad entry leaves the
/// previous schedule in place.
pub async fn replace_all(
    store: &dyn BookingStore,
    actor: Option<&Actor>,
    payload: &Value,
) -> BookingResult<Vec<WorkDay>> {
    require_admin(actor)?;

    let days = parse_entries(payload)?;
    let count = days.len();
    let schedule = store.replace_work_days(days).await?;

    info!("Replaced work schedule with {} entries", count);
    Ok(schedule)
}

/// Creates or patches one day. A day created without times keeps them unset.
pub async fn upsert_day(
    store: &dyn BookingStore,
    actor: Option<&Actor>,
    day_of_week: i32,
    request: UpdateWorkDayRequest,
) -> BookingResult<WorkDay> {
    require_admin(actor)?;
    validate_day_of_week(day_of_week)?;

    if let Some(start_time) = &request.start_time {
        parse_time(start_time)?;
    }
    if let Some(end_time) = &request.end_time {
        parse_time(end_time)?;
    }

    let day = store
        .upsert_work_day(
            day_of_week,
            WorkDayChanges {
                start_time: request.start_time,
                end_time: request.end_time,
                is_extended: request.is_extended,
            },
        )
        .await?;

    info!("Updated work schedule for {}", day.day_name());
    Ok(day)
}

pub async fn delete_day(
    store: &dyn BookingStore,
    actor: Option<&Actor>,
    day_of_week: i32,
) -> BookingResult<()> {
    require_admin(actor)?;
    validate_day_of_week(day_of_week)?;

    if !store.delete_work_day(day_of_week).await? {
        return Err(BookingError::NotFound(format!(
            "No work schedule for day {day_of_week}"
        )));
    }

    info!("Deleted work schedule for day {}", day_of_week);
    Ok(())
}

fn time_field(value: &Value, field: &str) -> BookingResult<String> {
    let time = value
        .as_str()
        .ok_or_else(|| BookingError::Validation(format!("{field} must be a string")))?;
    parse_time(time)?;
    Ok(time.to_string())
}
