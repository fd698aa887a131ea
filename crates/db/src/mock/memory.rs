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
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repositories::client::{hash_password, verify_password};

const REFERENCED: &str = "The record is referenced by existing appointments";

/// A [`BookingStore`] that keeps every table in memory behind one lock.
///
/// It enforces the same uniqueness and reference rules as the Postgres schema and
/// returns rows in the same order, so services behave identically on top of it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    clients: Vec<StoredClient>,
    services: Vec<Service>,
    appointments: Vec<Appointment>,
    work_days: Vec<WorkDay>,
}

#[derive(Debug)]
struct StoredClient {
    client: Client,
    password_hash: String,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tables {
    fn client(&self, id: Uuid) -> Option<&StoredClient> {
        self.clients.iter().find(|stored| stored.client.id == id)
    }

    fn ensure_unique_client(
        &self,
        username: &str,
        email: Option<&str>,
        except: Option<Uuid>,
    ) -> BookingResult<()> {
        let others = self
            .clients
            .iter()
            .map(|stored| &stored.client)
            .filter(|client| Some(client.id) != except);

        for client in others {
            if client.username == username {
                return Err(BookingError::Conflict("Username already exists".to_string()));
            }
            if email.is_some() && client.email.as_deref() == email {
                return Err(BookingError::Conflict("Email already exists".to_string()));
            }
        }
        Ok(())
    }

    fn ensure_free_slot(&self, date: &str, time: &str, except: Option<Uuid>) -> BookingResult<()> {
        let taken = self
            .appointments
            .iter()
            .any(|a| a.date == date && a.time == time && Some(a.id) != except);

        if taken {
            return Err(BookingError::Conflict(SLOT_TAKEN.to_string()));
        }
        Ok(())
    }

    fn ensure_service_exists(&self, service_id: Uuid) -> BookingResult<()> {
        if self.services.iter().any(|s| s.id == service_id) {
            Ok(())
        } else {
            Err(BookingError::Conflict(format!(
                "Service {service_id} does not exist"
            )))
        }
    }

    fn insert_client(&mut self, new_client: NewClient) -> BookingResult<Client> {
        self.ensure_unique_client(&new_client.username, new_client.email.as_deref(), None)?;

        let client = Client {
            id: Uuid::new_v4(),
            username: new_client.username,
            name: new_client.name,
            phone: new_client.phone,
            email: new_client.email,
            role: new_client.role,
            created_at: Utc::now().naive_utc(),
        };
        self.clients.push(StoredClient {
            client: client.clone(),
            password_hash: hash_password(&new_client.password)?,
        });
        Ok(client)
    }

    fn appointments_where<F>(&self, predicate: F) -> Vec<Appointment>
    where
        F: Fn(&Appointment) -> bool,
    {
        let mut found: Vec<Appointment> = self
            .appointments
            .iter()
            .filter(|a| predicate(a))
            .cloned()
            .collect();
        found.sort_by(|a, b| (&a.date, &a.time).cmp(&(&b.date, &b.time)));
        found
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn find_client(&self, id: Uuid) -> BookingResult<Option<Client>> {
        let tables = self.tables.read().await;
        Ok(tables.client(id).map(|stored| stored.client.clone()))
    }

    async fn find_client_by_username(&self, username: &str) -> BookingResult<Option<Client>> {
        let tables = self.tables.read().await;
        Ok(tables
            .clients
            .iter()
            .find(|stored| stored.client.username == username)
            .map(|stored| stored.client.clone()))
    }

    async fn find_client_by_email(&self, email: &str) -> BookingResult<Option<Client>> {
        let tables = self.tables.read().await;
        Ok(tables
            .clients
            .iter()
            .find(|stored| stored.client.email.as_deref() == Some(email))
            .map(|stored| stored.client.clone()))
    }

    async fn find_client_by_phone(&self, phone: &str) -> BookingResult<Option<Client>> {
        let tables = self.tables.read().await;
        Ok(tables
            .clients
            .iter()
            .find(|stored| stored.client.phone == phone)
            .map(|stored| stored.client.clone()))
    }

    async fn list_clients(&self) -> BookingResult<Vec<Client>> {
        let tables = self.tables.read().await;
        Ok(tables
            .clients
            .iter()
            .map(|stored| stored.client.clone())
            .collect())
    }

    async fn insert_client(&self, client: NewClient) -> BookingResult<Client> {
        self.tables.write().await.insert_client(client)
    }

    async fn update_client(&self, id: Uuid, changes: ClientChanges) -> BookingResult<Client> {
        let mut tables = self.tables.write().await;

        let current = tables
            .client(id)
            .map(|stored| stored.client.clone())
            .ok_or_else(|| BookingError::NotFound(format!("Client with ID {id} not found")))?;

        let username = changes.username.unwrap_or(current.username);
        let email = changes.email.or(current.email);
        tables.ensure_unique_client(&username, email.as_deref(), Some(id))?;

        let password_hash = changes
            .password
            .as_deref()
            .map(hash_password)
            .transpose()?;

        let stored = tables
            .clients
            .iter_mut()
            .find(|stored| stored.client.id == id)
            .ok_or_else(|| BookingError::NotFound(format!("Client with ID {id} not found")))?;

        stored.client.username = username;
        stored.client.email = email;
        if let Some(name) = changes.name {
            stored.client.name = name;
        }
        if let Some(phone) = changes.phone {
            stored.client.phone = phone;
        }
        if let Some(role) = changes.role {
            stored.client.role = role;
        }
        if let Some(password_hash) = password_hash {
            stored.password_hash = password_hash;
        }

        Ok(stored.client.clone())
    }

    async fn delete_client(&self, id: Uuid) -> BookingResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.appointments.iter().any(|a| a.client_id == id) {
            return Err(BookingError::Conflict(REFERENCED.to_string()));
        }

        let before = tables.clients.len();
        tables.clients.retain(|stored| stored.client.id != id);
        Ok(tables.clients.len() < before)
    }

    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> BookingResult<Option<Client>> {
        let tables = self.tables.read().await;
        let Some(stored) = tables
            .clients
            .iter()
            .find(|stored| stored.client.username == username)
        else {
            return Ok(None);
        };

        if verify_password(password, &stored.password_hash)? {
            Ok(Some(stored.client.clone()))
        } else {
            Ok(None)
        }
    }

    async fn find_service(&self, id: Uuid) -> BookingResult<Option<Service>> {
        let tables = self.tables.read().await;
        Ok(tables.services.iter().find(|s| s.id == id).cloned())
    }

    async fn find_service_by_name(&self, name: &str) -> BookingResult<Option<Service>> {
        let tables = self.tables.read().await;
        Ok(tables.services.iter().find(|s| s.name == name).cloned())
    }

    async fn list_services(&self) -> BookingResult<Vec<Service>> {
        let tables = self.tables.read().await;
        let mut services = tables.services.clone();
        services.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(services)
    }

    async fn insert_service(&self, service: NewService) -> BookingResult<Service> {
        let mut tables = self.tables.write().await;
        if tables.services.iter().any(|s| s.name == service.name) {
            return Err(BookingError::Conflict(
                "A service with this name already exists".to_string(),
            ));
        }

        let service = Service {
            id: Uuid::new_v4(),
            name: service.name,
            duration: service.duration,
            price: service.price,
        };
        tables.services.push(service.clone());
        Ok(service)
    }

    async fn update_service(&self, service: Service) -> BookingResult<Service> {
        let mut tables = self.tables.write().await;
        if tables
            .services
            .iter()
            .any(|s| s.name == service.name && s.id != service.id)
        {
            return Err(BookingError::Conflict(
                "A service with this name already exists".to_string(),
            ));
        }

        let existing = tables
            .services
            .iter_mut()
            .find(|s| s.id == service.id)
            .ok_or_else(|| BookingError::NotFound("Record not found".to_string()))?;
        *existing = service.clone();
        Ok(service)
    }

    async fn delete_service(&self, id: Uuid) -> BookingResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.appointments.iter().any(|a| a.service_id == id) {
            return Err(BookingError::Conflict(REFERENCED.to_string()));
        }

        let before = tables.services.len();
        tables.services.retain(|s| s.id != id);
        Ok(tables.services.len() < before)
    }

    async fn find_appointment(&self, id: Uuid) -> BookingResult<Option<Appointment>> {
        let tables = self.tables.read().await;
        Ok(tables.appointments.iter().find(|a| a.id == id).cloned())
    }

    async fn find_appointment_by_slot(
        &self,
        date: &str,
        time: &str,
    ) -> BookingResult<Option<Appointment>> {
        let tables = self.tables.read().await;
        Ok(tables
            .appointments
            .iter()
            .find(|a| a.date == date && a.time == time)
            .cloned())
    }

    async fn list_appointments(&self) -> BookingResult<Vec<Appointment>> {
        Ok(self.tables.read().await.appointments_where(|_| true))
    }

    async fn list_appointments_by_date(&self, date: &str) -> BookingResult<Vec<Appointment>> {
        Ok(self.tables.read().await.appointments_where(|a| a.date == date))
    }

    async fn list_appointments_by_client(
        &self,
        client_id: Uuid,
    ) -> BookingResult<Vec<Appointment>> {
        let mut found = self
            .tables
            .read()
            .await
            .appointments_where(|a| a.client_id == client_id);
        found.reverse();
        Ok(found)
    }

    async fn list_appointments_by_status(
        &self,
        status: AppointmentStatus,
    ) -> BookingResult<Vec<Appointment>> {
        Ok(self
            .tables
            .read()
            .await
            .appointments_where(|a| a.status == status))
    }

    async fn count_appointments_for_service(&self, service_id: Uuid) -> BookingResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .appointments
            .iter()
            .filter(|a| a.service_id == service_id)
            .count() as i64)
    }

    async fn count_appointments_for_client(&self, client_id: Uuid) -> BookingResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .appointments
            .iter()
            .filter(|a| a.client_id == client_id)
            .count() as i64)
    }

    async fn book_appointment(
        &self,
        client: BookingClient,
        appointment: NewAppointment,
    ) -> BookingResult<Appointment> {
        let mut tables = self.tables.write().await;

        // Check everything before touching a table so a failed booking leaves no walk-in behind
        tables.ensure_service_exists(appointment.service_id)?;
        tables.ensure_free_slot(&appointment.date, &appointment.time, None)?;
        match &client {
            BookingClient::Existing(id) if tables.client(*id).is_none() => {
                return Err(BookingError::Conflict(format!("Client {id} does not exist")));
            }
            BookingClient::WalkIn(walk_in) => {
                tables.ensure_unique_client(&walk_in.username, walk_in.email.as_deref(), None)?;
            }
            BookingClient::Existing(_) => {}
        }

        let client_id = match client {
            BookingClient::Existing(id) => id,
            BookingClient::WalkIn(walk_in) => tables.insert_client(walk_in)?.id,
        };

        let appointment = Appointment {
            id: Uuid::new_v4(),
            client_id,
            service_id: appointment.service_id,
            date: appointment.date,
            time: appointment.time,
            status: AppointmentStatus::Pending,
            created_at: Utc::now().naive_utc(),
        };
        tables.appointments.push(appointment.clone());
        Ok(appointment)
    }

    async fn update_appointment(&self, appointment: Appointment) -> BookingResult<Appointment> {
        let mut tables = self.tables.write().await;
        tables.ensure_service_exists(appointment.service_id)?;
        tables.ensure_free_slot(&appointment.date, &appointment.time, Some(appointment.id))?;

        let existing = tables
            .appointments
            .iter_mut()
            .find(|a| a.id == appointment.id)
            .ok_or_else(|| {
                BookingError::NotFound(format!(
                    "Appointment with ID {} not found",
                    appointment.id
                ))
            })?;

        existing.service_id = appointment.service_id;
        existing.date = appointment.date;
        existing.time = appointment.time;
        existing.status = appointment.status;
        Ok(existing.clone())
    }

    async fn delete_appointment(&self, id: Uuid) -> BookingResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.appointments.len();
        tables.appointments.retain(|a| a.id != id);
        Ok(tables.appointments.len() < before)
    }

    async fn list_work_days(&self) -> BookingResult<Vec<WorkDay>> {
        let tables = self.tables.read().await;
        let mut days = tables.work_days.clone();
        days.sort_by_key(|day| day.day_of_week);
        Ok(days)
    }

    async fn find_work_day(&self, day_of_week: i32) -> BookingResult<Option<WorkDay>> {
        let tables = self.tables.read().await;
        Ok(tables
            .work_days
            .iter()
            .find(|day| day.day_of_week == day_of_week)
            .cloned())
    }

    async fn replace_work_days(&self, days: Vec<NewWorkDay>) -> BookingResult<Vec<WorkDay>> {
        let mut seen = Vec::with_capacity(days.len());
        for day in &days {
            if seen.contains(&day.day_of_week) {
                return Err(BookingError::Conflict(
                    "A work schedule entry for this day already exists".to_string(),
                ));
            }
            seen.push(day.day_of_week);
        }

        let mut replacement: Vec<WorkDay> = days
            .into_iter()
            .map(|day| WorkDay {
                id: Uuid::new_v4(),
                day_of_week: day.day_of_week,
                start_time: Some(day.start_time),
                end_time: Some(day.end_time),
                is_extended: day.is_extended,
            })
            .collect();
        replacement.sort_by_key(|day| day.day_of_week);

        self.tables.write().await.work_days = replacement.clone();
        Ok(replacement)
    }

    async fn upsert_work_day(
        &self,
        day_of_week: i32,
        changes: WorkDayChanges,
    ) -> BookingResult<WorkDay> {
        let mut tables = self.tables.write().await;

        if let Some(day) = tables
            .work_days
            .iter_mut()
            .find(|day| day.day_of_week == day_of_week)
        {
            if changes.start_time.is_some() {
                day.start_time = changes.start_time;
            }
            if changes.end_time.is_some() {
                day.end_time = changes.end_time;
            }
            if let Some(is_extended) = changes.is_extended {
                day.is_extended = is_extended;
            }
            return Ok(day.clone());
        }

        let day = WorkDay {
            id: Uuid::new_v4(),
            day_of_week,
            start_time: changes.start_time,
            end_time: changes.end_time,
            is_extended: changes.is_extended.unwrap_or(false),
        };
        tables.work_days.push(day.clone());
        Ok(day)
    }

    async fn delete_work_day(&self, day_of_week: i32) -> BookingResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.work_days.len();
        tables.work_days.retain(|day| day.day_of_week != day_of_week);
        Ok(tables.work_days.len() < before)
    }
}
