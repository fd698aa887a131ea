use crate::models::DbService;
use barberbook_core::models::service::NewService;
use eyre::Result;
use sqlx::PgExecutor;
use uuid::Uuid;

pub async fn create_service<'e, E>(executor: E, service: &NewService) -> Result<DbService>
where
    E: PgExecutor<'e>,
{
    let id = Uuid::new_v4();
    tracing::debug!("Creating service: id={}, name={}", id, service.name);

    let row = sqlx::query_as::<_, DbService>(
        r#"
        INSERT INTO services (id, name, duration, price)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, duration, price
        "#,
    )
    .bind(id)
    .bind(&service.name)
    .bind(service.duration)
    .bind(service.price)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

pub async fn get_service_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<DbService>>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, duration, price
        FROM services
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(row)
}

pub async fn get_service_by_name<'e, E>(executor: E, name: &str) -> Result<Option<DbService>>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, duration, price
        FROM services
        WHERE name = $1
        "#,
    )
    .bind(name)
    .fetch_optional(executor)
    .await?;

    Ok(row)
}

pub async fn list_services<'e, E>(executor: E) -> Result<Vec<DbService>>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, duration, price
        FROM services
        ORDER BY name ASC
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

pub async fn update_service<'e, E>(executor: E, service: &DbService) -> Result<DbService>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, DbService>(
        r#"
        UPDATE services
        SET name = $2, duration = $3, price = $4
        WHERE id = $1
        RETURNING id, name, duration, price
        "#,
    )
    .bind(service.id)
    .bind(&service.name)
    .bind(service.duration)
    .bind(service.price)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

pub async fn delete_service<'e, E>(executor: E, id: Uuid) -> Result<bool>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM services WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}
