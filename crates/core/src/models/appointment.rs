use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::BookingError;

use super::{client::Client, service::Service};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| BookingError::Validation(format!("Invalid status: {s}")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub client_id: Uuid,
    pub service_id: Uuid,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub status: AppointmentStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub service_id: Uuid,
    pub date: String,
    pub time: String,
}

/// Who an appointment is booked for: a known client, or a walk-in inserted in the
/// same transaction as the appointment.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingClient {
    Existing(Uuid),
    WalkIn(super::client::NewClient),
}

/// Appointment joined with its client and service. Joined fields are `None` when the
/// reference no longer resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentDetails {
    pub id: Uuid,
    pub client_id: Uuid,
    pub client_name: Option<String>,
    pub client_phone: Option<String>,
    pub service_id: Uuid,
    pub service_name: Option<String>,
    pub service_price: Option<f64>,
    pub service_duration: Option<i32>,
    pub date: String,
    pub time: String,
    pub status: AppointmentStatus,
    pub created_at: NaiveDateTime,
}

impl AppointmentDetails {
    pub fn new(
        appointment: Appointment,
        client: Option<&Client>,
        service: Option<&Service>,
    ) -> Self {
        Self {
            id: appointment.id,
            client_id: appointment.client_id,
            client_name: client.map(|c| c.name.clone()),
            client_phone: client.map(|c| c.phone.clone()),
            service_id: appointment.service_id,
            service_name: service.map(|s| s.name.clone()),
            service_price: service.map(|s| s.price),
            service_duration: service.map(|s| s.duration),
            date: appointment.date,
            time: appointment.time,
            status: appointment.status,
            created_at: appointment.created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub client_name: Option<String>,
    pub client_phone: Option<String>,
    pub service_id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub client_email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub service_id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailableTimesQuery {
    pub date: Option<String>,
    pub service_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableTimesResponse {
    pub available_times: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub appointment: AppointmentDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentListResponse {
    pub appointments: Vec<AppointmentDetails>,
}
