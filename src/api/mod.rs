//! HTTP surface: response envelope, app state and route wiring.

mod clients;

use std::sync::Arc;

use actix_web::{Responder, get, web};
use serde::Serialize;

use crate::email::Mailer;
use crate::repo::ClientRepository;

/// Shared per-process dependencies, built once in `main` and handed to
/// every handler through `web::Data`.
pub struct AppState {
    pub repo: Arc<dyn ClientRepository>,
    pub mailer: Arc<Mailer>,
}

/// Success envelope: `{ "success": true, "data": ... }`. Failures are
/// produced by `ApiError::error_response` instead.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    success: bool,
    data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health);
    clients::configure(cfg);
}

#[get("/health")]
async fn health() -> impl Responder {
    web::Json(ApiResponse::ok("ok"))
}
