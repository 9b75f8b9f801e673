//! Postgres implementation of [`ClientRepository`] over an sqlx pool.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::config::Config;
use crate::models::{Client, ClientPatch, NewClient};
use crate::repo::{ClientRepository, RepoError};

/// Postgres SQLSTATE for a unique-constraint violation
const UNIQUE_VIOLATION: &str = "23505";

/// Create the connection pool and bring the schema up to date
pub async fn connect(config: &Config) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(config.database_url())
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

pub struct PgClientRepository {
    pool: PgPool,
}

impl PgClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Distinguish a duplicate-email insert/update from other database
/// failures. The unique index on `email` is the only unique constraint
/// on the table.
fn map_write_error(err: sqlx::Error) -> RepoError {
    match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            RepoError::DuplicateEmail
        }
        _ => RepoError::Database(err),
    }
}

#[async_trait]
impl ClientRepository for PgClientRepository {
    async fn list(&self) -> Result<Vec<Client>, RepoError> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, name, email, business_name, created_at, updated_at
             FROM clients
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    async fn get(&self, id: Uuid) -> Result<Client, RepoError> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, name, email, business_name, created_at, updated_at
             FROM clients
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        client.ok_or(RepoError::NotFound)
    }

    async fn create(&self, payload: NewClient) -> Result<Client, RepoError> {
        let client = sqlx::query_as::<_, Client>(
            "INSERT INTO clients (name, email, business_name)
             VALUES ($1, $2, $3)
             RETURNING id, name, email, business_name, created_at, updated_at",
        )
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(&payload.business_name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(client)
    }

    async fn update(&self, id: Uuid, patch: ClientPatch) -> Result<Client, RepoError> {
        // COALESCE keeps absent fields untouched; a single statement also
        // makes the unique check and the row lookup one round trip.
        let client = sqlx::query_as::<_, Client>(
            "UPDATE clients
             SET name = COALESCE($2, name),
                 email = COALESCE($3, email),
                 business_name = COALESCE($4, business_name),
                 updated_at = now()
             WHERE id = $1
             RETURNING id, name, email, business_name, created_at, updated_at",
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.email)
        .bind(&patch.business_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        client.ok_or(RepoError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        // Zero rows affected is fine: delete is idempotent by contract
        sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
