use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A client record as stored in the `clients` table. `id`, `created_at` and
/// `updated_at` are assigned by the store and never client-settable.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub business_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw body of `POST /clients`. Fields are optional so that a missing key
/// reaches validation instead of failing JSON extraction.
#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub business_name: Option<String>,
}

/// Raw body of `PATCH /clients/{id}`. Only the mutable columns are
/// representable here; `id`, `created_at`, `updated_at` and any stray keys
/// in the request body are dropped during deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateClientRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub business_name: Option<String>,
}

/// Normalized create payload: trimmed name/business name, lowercase
/// trimmed email. Produced only by validation.
#[derive(Debug, Clone)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub business_name: String,
}

/// Normalized partial update. `None` leaves the stored column untouched.
#[derive(Debug, Clone, Default)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub business_name: Option<String>,
}

impl ClientPatch {
    /// True when no mutable field survived validation
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.business_name.is_none()
    }
}
