use crate::models::DbWorkDay;
use barberbook_core::models::work_schedule::{NewWorkDay, WorkDayChanges};
use eyre::Result;
use sqlx::PgExecutor;
use uuid::Uuid;

pub async fn list_work_days<'e, E>(executor: E) -> Result<Vec<DbWorkDay>>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, DbWorkDay>(
        r#"
        SELECT id, day_of_week, start_time, end_time, is_extended
        FROM work_schedule
        ORDER BY day_of_week ASC
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

pub async fn get_work_day<'e, E>(executor: E, day_of_week: i32) -> Result<Option<DbWorkDay>>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, DbWorkDay>(
        r#"
        SELECT id, day_of_week, start_time, end_time, is_extended
        FROM work_schedule
        WHERE day_of_week = $1
        "#,
    )
    .bind(day_of_week)
    .fetch_optional(executor)
    .await?;

    Ok(row)
}

pub async fn create_work_day<'e, E>(executor: E, day: &NewWorkDay) -> Result<DbWorkDay>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, DbWorkDay>(
        r#"
        INSERT INTO work_schedule (id, day_of_week, start_time, end_time, is_extended)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, day_of_week, start_time, end_time, is_extended
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(day.day_of_week)
    .bind(&day.start_time)
    .bind(&day.end_time)
    .bind(day.is_extended)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

/// Inserts the day or patches only the supplied columns of the existing row.
pub async fn upsert_work_day<'e, E>(
    executor: E,
    day_of_week: i32,
    changes: &WorkDayChanges,
) -> Result<DbWorkDay>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, DbWorkDay>(
        r#"
        INSERT INTO work_schedule (id, day_of_week, start_time, end_time, is_extended)
        VALUES ($1, $2, $3, $4, COALESCE($5, FALSE))
        ON CONFLICT (day_of_week) DO UPDATE
        SET start_time = COALESCE($3, work_schedule.start_time),
            end_time = COALESCE($4, work_schedule.end_time),
            is_extended = COALESCE($5, work_schedule.is_extended)
        RETURNING id, day_of_week, start_time, end_time, is_extended
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(day_of_week)
    .bind(&changes.start_time)
    .bind(&changes.end_time)
    .bind(changes.is_extended)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

pub async fn delete_work_day<'e, E>(executor: E, day_of_week: i32) -> Result<bool>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM work_schedule WHERE day_of_week = $1")
        .bind(day_of_week)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_all_work_days<'e, E>(executor: E) -> Result<u64>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM work_schedule")
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}
