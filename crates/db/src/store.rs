//! # Postgres Store
//!
//! [`BookingStore`] over a sqlx connection pool. Uniqueness and reference rules
//! are left to the schema's constraints; their violations come back from Postgres
//! and are translated into [`BookingError::Conflict`] here.

use async_trait::async_trait;
use barberbook_core::{
    errors::{BookingError, BookingResult},
    ledger::SLOT_TAKEN,
    models::{
        appointment::{Appointment, AppointmentStatus, BookingClient, NewAppointment},
        client::{Client, ClientChanges, NewClient},
        service::{NewService, Service},
        work_schedule::{NewWorkDay, WorkDay, WorkDayChanges},
    },
    store::BookingStore,
};
use eyre::Report;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    DbPool,
    models::{DbAppointment, DbClient, DbService},
    repositories::{appointment, client, service, work_schedule},
};

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Translates constraint violations into domain conflicts; everything else stays
/// a database error.
pub fn map_db_error(report: Report) -> BookingError {
    let translated = match report.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db_error)) => match db_error.code().as_deref() {
            Some(UNIQUE_VIOLATION) => Some(BookingError::Conflict(unique_violation_message(
                db_error.constraint(),
            ))),
            Some(FOREIGN_KEY_VIOLATION) => Some(BookingError::Conflict(
                "The record is referenced by existing appointments".to_string(),
            )),
            _ => None,
        },
        Some(sqlx::Error::RowNotFound) => {
            Some(BookingError::NotFound("Record not found".to_string()))
        }
        _ => None,
    };

    translated.unwrap_or_else(|| BookingError::Database(report))
}

fn unique_violation_message(constraint: Option<&str>) -> String {
    match constraint {
        Some("appointments_slot_key") => SLOT_TAKEN.to_string(),
        Some("users_username_key") => "Username already exists".to_string(),
        Some("users_email_key") => "Email already exists".to_string(),
        Some("services_name_key") => "A service with this name already exists".to_string(),
        Some("work_schedule_day_of_week_key") => {
            "A work schedule entry for this day already exists".to_string()
        }
        Some(other) => format!("Duplicate value violates {other}"),
        None => "Duplicate value".to_string(),
    }
}

fn sql_error(error: sqlx::Error) -> BookingError {
    map_db_error(Report::new(error))
}

fn to_client(row: DbClient) -> BookingResult<Client> {
    Client::try_from(row).map_err(BookingError::Database)
}

fn to_appointment(row: DbAppointment) -> BookingResult<Appointment> {
    Appointment::try_from(row).map_err(BookingError::Database)
}

fn to_appointments(rows: Vec<DbAppointment>) -> BookingResult<Vec<Appointment>> {
    rows.into_iter().map(to_appointment).collect()
}

#[async_trait]
impl BookingStore for PgStore {
    async fn find_client(&self, id: Uuid) -> BookingResult<Option<Client>> {
        client::get_client_by_id(&self.pool, id)
            .await
            .map_err(map_db_error)?
            .map(to_client)
            .transpose()
    }

    async fn find_client_by_username(&self, username: &str) -> BookingResult<Option<Client>> {
        client::get_client_by_username(&self.pool, username)
            .await
            .map_err(map_db_error)?
            .map(to_client)
            .transpose()
    }

    async fn find_client_by_email(&self, email: &str) -> BookingResult<Option<Client>> {
        client::get_client_by_email(&self.pool, email)
            .await
            .map_err(map_db_error)?
            .map(to_client)
            .transpose()
    }

    async fn find_client_by_phone(&self, phone: &str) -> BookingResult<Option<Client>> {
        client::get_client_by_phone(&self.pool, phone)
            .await
            .map_err(map_db_error)?
            .map(to_client)
            .transpose()
    }

    async fn list_clients(&self) -> BookingResult<Vec<Client>> {
        client::list_clients(&self.pool)
            .await
            .map_err(map_db_error)?
            .into_iter()
            .map(to_client)
            .collect()
    }

    async fn insert_client(&self, new_client: NewClient) -> BookingResult<Client> {
        let row = client::create_client(&self.pool, &new_client)
            .await
            .map_err(map_db_error)?;
        to_client(row)
    }

    async fn update_client(&self, id: Uuid, changes: ClientChanges) -> BookingResult<Client> {
        let mut row = client::get_client_by_id(&self.pool, id)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| BookingError::NotFound(format!("Client with ID {id} not found")))?;

        if let Some(username) = changes.username {
            row.username = username;
        }
        if let Some(name) = changes.name {
            row.name = name;
        }
        if let Some(phone) = changes.phone {
            row.phone = phone;
        }
        if let Some(email) = changes.email {
            row.email = Some(email);
        }
        if let Some(role) = changes.role {
            row.role = role.as_str().to_string();
        }
        if let Some(password) = changes.password {
            row.password_hash = client::hash_password(&password)?;
        }

        let row = client::update_client(&self.pool, &row)
            .await
            .map_err(map_db_error)?;
        to_client(row)
    }

    async fn delete_client(&self, id: Uuid) -> BookingResult<bool> {
        client::delete_client(&self.pool, id)
            .await
            .map_err(map_db_error)
    }

    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> BookingResult<Option<Client>> {
        let Some(row) = client::get_client_by_username(&self.pool, username)
            .await
            .map_err(map_db_error)?
        else {
            debug!("Login attempt for unknown user {}", username);
            return Ok(None);
        };

        if client::verify_password(password, &row.password_hash)? {
            to_client(row).map(Some)
        } else {
            Ok(None)
        }
    }

    async fn find_service(&self, id: Uuid) -> BookingResult<Option<Service>> {
        Ok(service::get_service_by_id(&self.pool, id)
            .await
            .map_err(map_db_error)?
            .map(Service::from))
    }

    async fn find_service_by_name(&self, name: &str) -> BookingResult<Option<Service>> {
        Ok(service::get_service_by_name(&self.pool, name)
            .await
            .map_err(map_db_error)?
            .map(Service::from))
    }

    async fn list_services(&self) -> BookingResult<Vec<Service>> {
        Ok(service::list_services(&self.pool)
            .await
            .map_err(map_db_error)?
            .into_iter()
            .map(Service::from)
            .collect())
    }

    async fn insert_service(&self, new_service: NewService) -> BookingResult<Service> {
        let row = service::create_service(&self.pool, &new_service)
            .await
            .map_err(map_db_error)?;
        Ok(row.into())
    }

    async fn update_service(&self, updated: Service) -> BookingResult<Service> {
        let row = DbService {
            id: updated.id,
            name: updated.name,
            duration: updated.duration,
            price: updated.price,
        };
        let row = service::update_service(&self.pool, &row)
            .await
            .map_err(map_db_error)?;
        Ok(row.into())
    }

    async fn delete_service(&self, id: Uuid) -> BookingResult<bool> {
        service::delete_service(&self.pool, id)
            .await
            .map_err(map_db_error)
    }

    async fn find_appointment(&self, id: Uuid) -> BookingResult<Option<Appointment>> {
        appointment::get_appointment_by_id(&self.pool, id)
            .await
            .map_err(map_db_error)?
            .map(to_appointment)
            .transpose()
    }

    async fn find_appointment_by_slot(
        &self,
        date: &str,
        time: &str,
    ) -> BookingResult<Option<Appointment>> {
        appointment::get_appointment_by_slot(&self.pool, date, time)
            .await
            .map_err(map_db_error)?
            .map(to_appointment)
            .transpose()
    }

    async fn list_appointments(&self) -> BookingResult<Vec<Appointment>> {
        to_appointments(
            appointment::list_appointments(&self.pool)
                .await
                .map_err(map_db_error)?,
        )
    }

    async fn list_appointments_by_date(&self, date: &str) -> BookingResult<Vec<Appointment>> {
        to_appointments(
            appointment::get_appointments_by_date(&self.pool, date)
                .await
                .map_err(map_db_error)?,
        )
    }

    async fn list_appointments_by_client(
        &self,
        client_id: Uuid,
    ) -> BookingResult<Vec<Appointment>> {
        to_appointments(
            appointment::get_appointments_by_client(&self.pool, client_id)
                .await
                .map_err(map_db_error)?,
        )
    }

    async fn list_appointments_by_status(
        &self,
        status: AppointmentStatus,
    ) -> BookingResult<Vec<Appointment>> {
        to_appointments(
            appointment::get_appointments_by_status(&self.pool, status)
                .await
                .map_err(map_db_error)?,
        )
    }

    async fn count_appointments_for_service(&self, service_id: Uuid) -> BookingResult<i64> {
        appointment::count_by_service(&self.pool, service_id)
            .await
            .map_err(map_db_error)
    }

    async fn count_appointments_for_client(&self, client_id: Uuid) -> BookingResult<i64> {
        appointment::count_by_client(&self.pool, client_id)
            .await
            .map_err(map_db_error)
    }

    async fn book_appointment(
        &self,
        booking_client: BookingClient,
        new_appointment: NewAppointment,
    ) -> BookingResult<Appointment> {
        let mut tx = self.pool.begin().await.map_err(sql_error)?;

        let client_id = match booking_client {
            BookingClient::Existing(id) => id,
            BookingClient::WalkIn(walk_in) => {
                let row = client::create_client(&mut *tx, &walk_in)
                    .await
                    .map_err(map_db_error)?;
                info!("Created walk-in client {} ({})", row.username, row.id);
                row.id
            }
        };

        let row = appointment::create_appointment(&mut *tx, client_id, &new_appointment)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(sql_error)?;
        to_appointment(row)
    }

    async fn update_appointment(&self, updated: Appointment) -> BookingResult<Appointment> {
        let row = DbAppointment {
            id: updated.id,
            client_id: updated.client_id,
            service_id: updated.service_id,
            date: updated.date,
            time: updated.time,
            status: updated.status.as_str().to_string(),
            created_at: updated.created_at,
        };

        appointment::update_appointment(&self.pool, &row)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Appointment with ID {} not found", row.id))
            })
            .and_then(to_appointment)
    }

    async fn delete_appointment(&self, id: Uuid) -> BookingResult<bool> {
        appointment::delete_appointment(&self.pool, id)
            .await
            .map_err(map_db_error)
    }

    async fn list_work_days(&self) -> BookingResult<Vec<WorkDay>> {
        Ok(work_schedule::list_work_days(&self.pool)
            .await
            .map_err(map_db_error)?
            .into_iter()
            .map(WorkDay::from)
            .collect())
    }

    async fn find_work_day(&self, day_of_week: i32) -> BookingResult<Option<WorkDay>> {
        Ok(work_schedule::get_work_day(&self.pool, day_of_week)
            .await
            .map_err(map_db_error)?
            .map(WorkDay::from))
    }

    async fn replace_work_days(&self, days: Vec<NewWorkDay>) -> BookingResult<Vec<WorkDay>> {
        let mut tx = self.pool.begin().await.map_err(sql_error)?;

        let removed = work_schedule::delete_all_work_days(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let mut created = Vec::with_capacity(days.len());
        for day in &days {
            let row = work_schedule::create_work_day(&mut *tx, day)
                .await
                .map_err(map_db_error)?;
            created.push(WorkDay::from(row));
        }

        tx.commit().await.map_err(sql_error)?;
        debug!(
            "Replaced work schedule: removed {}, inserted {}",
            removed,
            created.len()
        );

        created.sort_by_key(|day| day.day_of_week);
        Ok(created)
    }

    async fn upsert_work_day(
        &self,
        day_of_week: i32,
        changes: WorkDayChanges,
    ) -> BookingResult<WorkDay> {
        let row = work_schedule::upsert_work_day(&self.pool, day_of_week, &changes)
            .await
            .map_err(map_db_error)?;
        Ok(row.into())
    }

    async fn delete_work_day(&self, day_of_week: i32) -> BookingResult<bool> {
        work_schedule::delete_work_day(&self.pool, day_of_week)
            .await
            .map_err(map_db_error)
    }
}
