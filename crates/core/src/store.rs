//! # Booking Store
//!
//! The persistence seam between the domain services and whatever relational store
//! backs them. Every method is a single unit of work: implementations must apply
//! multi-row writes ([`BookingStore::book_appointment`],
//! [`BookingStore::replace_work_days`]) atomically, and must enforce these
//! uniqueness rules themselves, reporting violations as [`BookingError::Conflict`]:
//!
//! - one appointment per `(date, time)`
//! - one client per `username`, and per `email` when present
//! - one service per `name`
//! - one work-schedule entry per `day_of_week`
//!
//! [`BookingError::Conflict`]: crate::errors::BookingError::Conflict

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    errors::BookingResult,
    models::{
        appointment::{Appointment, AppointmentStatus, BookingClient, NewAppointment},
        client::{Client, ClientChanges, NewClient},
        service::{NewService, Service},
        work_schedule::{NewWorkDay, WorkDay, WorkDayChanges},
    },
};

#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait BookingStore: Send + Sync {
    // Clients

    async fn find_client(&self, id: Uuid) -> BookingResult<Option<Client>>;

    async fn find_client_by_username(&self, username: &str) -> BookingResult<Option<Client>>;

    async fn find_client_by_email(&self, email: &str) -> BookingResult<Option<Client>>;

    async fn find_client_by_phone(&self, phone: &str) -> BookingResult<Option<Client>>;

    async fn list_clients(&self) -> BookingResult<Vec<Client>>;

    async fn insert_client(&self, client: NewClient) -> BookingResult<Client>;

    /// Fails with `NotFound` when the client does not exist.
    async fn update_client(&self, id: Uuid, changes: ClientChanges) -> BookingResult<Client>;

    /// Returns `false` when there was nothing to delete.
    async fn delete_client(&self, id: Uuid) -> BookingResult<bool>;

    /// Returns the client when `password` matches the stored credential.
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> BookingResult<Option<Client>>;

    // Services

    async fn find_service(&self, id: Uuid) -> BookingResult<Option<Service>>;

    async fn find_service_by_name(&self, name: &str) -> BookingResult<Option<Service>>;

    async fn list_services(&self) -> BookingResult<Vec<Service>>;

    async fn insert_service(&self, service: NewService) -> BookingResult<Service>;

    async fn update_service(&self, service: Service) -> BookingResult<Service>;

    async fn delete_service(&self, id: Uuid) -> BookingResult<bool>;

    // Appointments

    async fn find_appointment(&self, id: Uuid) -> BookingResult<Option<Appointment>>;

    async fn find_appointment_by_slot(
        &self,
        date: &str,
        time: &str,
    ) -> BookingResult<Option<Appointment>>;

    /// Ordered by date, then time, ascending.
    async fn list_appointments(&self) -> BookingResult<Vec<Appointment>>;

    /// Ordered by time ascending.
    async fn list_appointments_by_date(&self, date: &str) -> BookingResult<Vec<Appointment>>;

    /// Ordered by date, then time, descending.
    async fn list_appointments_by_client(&self, client_id: Uuid)
    -> BookingResult<Vec<Appointment>>;

    /// Ordered by date, then time, ascending.
    async fn list_appointments_by_status(
        &self,
        status: AppointmentStatus,
    ) -> BookingResult<Vec<Appointment>>;

    async fn count_appointments_for_service(&self, service_id: Uuid) -> BookingResult<i64>;

    async fn count_appointments_for_client(&self, client_id: Uuid) -> BookingResult<i64>;

    /// Inserts the walk-in client (if any) and the appointment in one transaction,
    /// with status `pending`.
    async fn book_appointment(
        &self,
        client: BookingClient,
        appointment: NewAppointment,
    ) -> BookingResult<Appointment>;

    /// Overwrites service, date, time and status of an existing appointment.
    async fn update_appointment(&self, appointment: Appointment) -> BookingResult<Appointment>;

    async fn delete_appointment(&self, id: Uuid) -> BookingResult<bool>;

    // Work schedule

    /// Ordered by day of week ascending.
    async fn list_work_days(&self) -> BookingResult<Vec<WorkDay>>;

    async fn find_work_day(&self, day_of_week: i32) -> BookingResult<Option<WorkDay>>;

    /// Deletes every entry and inserts `days`, all or nothing.
    async fn replace_work_days(&self, days: Vec<NewWorkDay>) -> BookingResult<Vec<WorkDay>>;

    /// Creates the day when missing, otherwise patches the supplied fields.
    async fn upsert_work_day(
        &self,
        day_of_week: i32,
        changes: WorkDayChanges,
    ) -> BookingResult<WorkDay>;

    async fn delete_work_day(&self, day_of_week: i32) -> BookingResult<bool>;
}
