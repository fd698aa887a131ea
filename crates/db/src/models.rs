use barberbook_core::models::{
    appointment::Appointment, client::Client, service::Service, work_schedule::WorkDay,
};
use chrono::NaiveDateTime;
use eyre::{Report, eyre};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbClient {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub role: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub name: String,
    pub duration: i32,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub client_id: Uuid,
    pub service_id: Uuid,
    pub date: String,
    pub time: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbWorkDay {
    pub id: Uuid,
    pub day_of_week: i32,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_extended: bool,
}

impl TryFrom<DbClient> for Client {
    type Error = Report;

    fn try_from(row: DbClient) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse()
            .map_err(|e| eyre!("Stored role for user {} is unreadable: {}", row.id, e))?;

        Ok(Client {
            id: row.id,
            username: row.username,
            name: row.name,
            phone: row.phone,
            email: row.email,
            role,
            created_at: row.created_at,
        })
    }
}

impl From<DbService> for Service {
    fn from(row: DbService) -> Self {
        Service {
            id: row.id,
            name: row.name,
            duration: row.duration,
            price: row.price,
        }
    }
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = Report;

    fn try_from(row: DbAppointment) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|e| eyre!("Stored status for appointment {} is unreadable: {}", row.id, e))?;

        Ok(Appointment {
            id: row.id,
            client_id: row.client_id,
            service_id: row.service_id,
            date: row.date,
            time: row.time,
            status,
            created_at: row.created_at,
        })
    }
}

impl From<DbWorkDay> for WorkDay {
    fn from(row: DbWorkDay) -> Self {
        WorkDay {
            id: row.id,
            day_of_week: row.day_of_week,
            start_time: row.start_time,
            end_time: row.end_time,
            is_extended: row.is_extended,
        }
    }
}
