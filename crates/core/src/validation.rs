//! Input checks shared by the domain services.

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// Returns the value of a required field, rejecting `None` and empty strings.
pub fn require_field<'a>(field: &str, value: Option<&'a str>) -> BookingResult<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(BookingError::required(field)),
    }
}

pub fn parse_date(value: &str) -> BookingResult<NaiveDate> {
    // Length check keeps unpadded dates like "2024-3-1" out of the store.
    if value.len() != 10 {
        return Err(invalid_date(value));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid_date(value))
}

pub fn parse_time(value: &str) -> BookingResult<NaiveTime> {
    if value.len() != 5 {
        return Err(invalid_time(value));
    }
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| invalid_time(value))
}

pub fn parse_id(field: &str, value: &str) -> BookingResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| BookingError::Validation(format!("{field} is not a valid id: {value}")))
}

pub fn validate_day_of_week(day_of_week: i32) -> BookingResult<()> {
    if (0..=6).contains(&day_of_week) {
        Ok(())
    } else {
        Err(BookingError::Validation(format!(
            "Invalid day of week {day_of_week} (expected 0-6)"
        )))
    }
}

fn invalid_date(value: &str) -> BookingError {
    BookingError::Validation(format!("Invalid date {value:?}, expected YYYY-MM-DD"))
}

fn invalid_time(value: &str) -> BookingError {
    BookingError::Validation(format!("Invalid time {value:?}, expected HH:MM"))
}
