use crate::models::DbClient;
use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{PasswordHash, SaltString, rand_core::OsRng},
};
use barberbook_core::models::client::NewClient;
use chrono::Utc;
use eyre::{Result, eyre};
use sqlx::PgExecutor;
use uuid::Uuid;

const COLUMNS: &str = "id, username, password_hash, name, phone, email, role, created_at";

/// Hashes a password with Argon2 and a fresh random salt, returning the PHC string.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Checks `password` against a PHC string produced by [`hash_password`].
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(password_hash).map_err(|e| eyre!("Invalid password hash: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub async fn create_client<'e, E>(executor: E, client: &NewClient) -> Result<DbClient>
where
    E: PgExecutor<'e>,
{
    let id = Uuid::new_v4();
    let now = Utc::now().naive_utc();
    let password_hash = hash_password(&client.password)?;

    tracing::debug!(
        "Creating user: id={}, username={}, role={}",
        id,
        client.username,
        client.role
    );

    let row = sqlx::query_as::<_, DbClient>(&format!(
        r#"
        INSERT INTO users (id, username, password_hash, name, phone, email, role, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&client.username)
    .bind(password_hash)
    .bind(&client.name)
    .bind(&client.phone)
    .bind(&client.email)
    .bind(client.role.as_str())
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

pub async fn get_client_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<DbClient>>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, DbClient>(&format!(
        "SELECT {COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(row)
}

pub async fn get_client_by_username<'e, E>(executor: E, username: &str) -> Result<Option<DbClient>>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, DbClient>(&format!(
        "SELECT {COLUMNS} FROM users WHERE username = $1"
    ))
    .bind(username)
    .fetch_optional(executor)
    .await?;

    Ok(row)
}

pub async fn get_client_by_email<'e, E>(executor: E, email: &str) -> Result<Option<DbClient>>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, DbClient>(&format!(
        "SELECT {COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(executor)
    .await?;

    Ok(row)
}

/// Phone numbers are not unique; the oldest account wins.
pub async fn get_client_by_phone<'e, E>(executor: E, phone: &str) -> Result<Option<DbClient>>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, DbClient>(&format!(
        "SELECT {COLUMNS} FROM users WHERE phone = $1 ORDER BY created_at ASC LIMIT 1"
    ))
    .bind(phone)
    .fetch_optional(executor)
    .await?;

    Ok(row)
}

pub async fn list_clients<'e, E>(executor: E) -> Result<Vec<DbClient>>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, DbClient>(&format!(
        "SELECT {COLUMNS} FROM users ORDER BY created_at ASC"
    ))
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

/// Writes every mutable column of `client` back to its row.
pub async fn update_client<'e, E>(executor: E, client: &DbClient) -> Result<DbClient>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, DbClient>(&format!(
        r#"
        UPDATE users
        SET username = $2, password_hash = $3, name = $4, phone = $5, email = $6, role = $7
        WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(client.id)
    .bind(&client.username)
    .bind(&client.password_hash)
    .bind(&client.name)
    .bind(&client.phone)
    .bind(&client.email)
    .bind(&client.role)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

pub async fn delete_client<'e, E>(executor: E, id: Uuid) -> Result<bool>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}
