//! Data-access contract for the `clients` table.
//!
//! Handlers talk to storage through [`ClientRepository`], constructed once
//! per process and injected via app state, so the HTTP contract can be
//! exercised against any backend.

mod postgres;

pub use postgres::{PgClientRepository, connect};

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Client, ClientPatch, NewClient};

/// Storage outcomes the API layer distinguishes. Anything that is not a
/// missing row or a duplicate email surfaces as `Database`.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("client not found")]
    NotFound,

    #[error("duplicate email")]
    DuplicateEmail,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// All clients, newest first (`created_at` descending). An empty table
    /// yields an empty vec, never an error.
    async fn list(&self) -> Result<Vec<Client>, RepoError>;

    /// The client with the given id, or [`RepoError::NotFound`].
    async fn get(&self, id: Uuid) -> Result<Client, RepoError>;

    /// Insert one row; the store assigns `id`, `created_at` and
    /// `updated_at`. Returns the persisted record.
    async fn create(&self, payload: NewClient) -> Result<Client, RepoError>;

    /// Apply the present fields of the patch to the matching row and
    /// refresh `updated_at`. Returns the full updated record.
    async fn update(&self, id: Uuid, patch: ClientPatch) -> Result<Client, RepoError>;

    /// Hard-delete the matching row. Deleting a missing id is not an
    /// error (idempotent delete).
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}
