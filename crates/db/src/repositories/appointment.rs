use crate::models::DbAppointment;
use barberbook_core::models::appointment::{AppointmentStatus, NewAppointment};
use chrono::Utc;
use eyre::Result;
use sqlx::PgExecutor;
use uuid::Uuid;

pub async fn create_appointment<'e, E>(
    executor: E,
    client_id: Uuid,
    appointment: &NewAppointment,
) -> Result<DbAppointment>
where
    E: PgExecutor<'e>,
{
    let id = Uuid::new_v4();
    let now = Utc::now().naive_utc();

    tracing::debug!(
        "Creating appointment: id={}, client_id={}, slot={} {}",
        id,
        client_id,
        appointment.date,
        appointment.time
    );

    let row = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments (id, client_id, service_id, date, time, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, client_id, service_id, date, time, status, created_at
        "#,
    )
    .bind(id)
    .bind(client_id)
    .bind(appointment.service_id)
    .bind(&appointment.date)
    .bind(&appointment.time)
    .bind(AppointmentStatus::Pending.as_str())
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

pub async fn get_appointment_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<DbAppointment>>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, client_id, service_id, date, time, status, created_at
        FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(row)
}

pub async fn get_appointment_by_slot<'e, E>(
    executor: E,
    date: &str,
    time: &str,
) -> Result<Option<DbAppointment>>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, client_id, service_id, date, time, status, created_at
        FROM appointments
        WHERE date = $1 AND time = $2
        "#,
    )
    .bind(date)
    .bind(time)
    .fetch_optional(executor)
    .await?;

    Ok(row)
}

pub async fn list_appointments<'e, E>(executor: E) -> Result<Vec<DbAppointment>>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, client_id, service_id, date, time, status, created_at
        FROM appointments
        ORDER BY date ASC, time ASC
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

pub async fn get_appointments_by_date<'e, E>(executor: E, date: &str) -> Result<Vec<DbAppointment>>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, client_id, service_id, date, time, status, created_at
        FROM appointments
        WHERE date = $1
        ORDER BY time ASC
        "#,
    )
    .bind(date)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

pub async fn get_appointments_by_client<'e, E>(
    executor: E,
    client_id: Uuid,
) -> Result<Vec<DbAppointment>>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, client_id, service_id, date, time, status, created_at
        FROM appointments
        WHERE client_id = $1
        ORDER BY date DESC, time DESC
        "#,
    )
    .bind(client_id)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

pub async fn get_appointments_by_status<'e, E>(
    executor: E,
    status: AppointmentStatus,
) -> Result<Vec<DbAppointment>>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, client_id, service_id, date, time, status, created_at
        FROM appointments
        WHERE status = $1
        ORDER BY date ASC, time ASC
        "#,
    )
    .bind(status.as_str())
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

pub async fn count_by_service<'e, E>(executor: E, service_id: Uuid) -> Result<i64>
where
    E: PgExecutor<'e>,
{
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM appointments WHERE service_id = $1")
            .bind(service_id)
            .fetch_one(executor)
            .await?;

    Ok(count)
}

pub async fn count_by_client<'e, E>(executor: E, client_id: Uuid) -> Result<i64>
where
    E: PgExecutor<'e>,
{
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM appointments WHERE client_id = $1")
            .bind(client_id)
            .fetch_one(executor)
            .await?;

    Ok(count)
}

/// Returns `None` when no row has the appointment's id.
pub async fn update_appointment<'e, E>(
    executor: E,
    appointment: &DbAppointment,
) -> Result<Option<DbAppointment>>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, DbAppointment>(
        r#"
        UPDATE appointments
        SET service_id = $2, date = $3, time = $4, status = $5
        WHERE id = $1
        RETURNING id, client_id, service_id, date, time, status, created_at
        "#,
    )
    .bind(appointment.id)
    .bind(appointment.service_id)
    .bind(&appointment.date)
    .bind(&appointment.time)
    .bind(&appointment.status)
    .fetch_optional(executor)
    .await?;

    Ok(row)
}

pub async fn delete_appointment<'e, E>(executor: E, id: Uuid) -> Result<bool>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}
