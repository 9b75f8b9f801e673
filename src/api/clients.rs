//! Client CRUD endpoints.
//!
//! Each handler is a stateless request/response cycle: validate, hit the
//! repository, map the outcome. The welcome email after a create is the
//! only side effect, dispatched fire-and-forget.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::{ApiResponse, AppState};
use crate::email::WelcomeEmail;
use crate::error::ApiError;
use crate::models::{CreateClientRequest, UpdateClientRequest};
use crate::validation;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_clients)
        .service(get_client)
        .service(create_client)
        .service(update_client)
        .service(delete_client);
}

#[get("/clients")]
async fn list_clients(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let clients = state.repo.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(clients)))
}

#[get("/clients/{id}")]
async fn get_client(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let client = state.repo.get(*id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(client)))
}

#[post("/clients")]
async fn create_client(
    state: web::Data<AppState>,
    body: web::Json<CreateClientRequest>,
) -> Result<HttpResponse, ApiError> {
    let payload = validation::validate_create(&body)?;
    let client = state.repo.create(payload).await?;
    info!(client_id = %client.id, "client created");

    // Fire-and-forget: the send runs on a blocking task (the SMTP
    // transport is synchronous) and its outcome never affects the
    // response. Creation already succeeded.
    let welcome = WelcomeEmail {
        to: client.email.clone(),
        client_name: client.name.clone(),
        business_name: client.business_name.clone(),
    };
    let mailer = state.mailer.clone();
    tokio::task::spawn_blocking(move || match mailer.send_welcome(&welcome) {
        Ok(Some(message_id)) => info!(recipient = %welcome.to, %message_id, "welcome email sent"),
        Ok(None) => {}
        Err(err) => warn!(recipient = %welcome.to, "welcome email failed: {err}"),
    });

    Ok(HttpResponse::Created().json(ApiResponse::ok(client)))
}

#[patch("/clients/{id}")]
async fn update_client(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    body: web::Json<UpdateClientRequest>,
) -> Result<HttpResponse, ApiError> {
    let patch = validation::validate_update(&body)?;
    let client = state.repo.update(*id, patch).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(client)))
}

#[delete("/clients/{id}")]
async fn delete_client(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    state.repo.delete(*id).await?;
    // Idempotent: a missing id still reports success with null data
    Ok(HttpResponse::Ok().json(ApiResponse::ok(serde_json::Value::Null)))
}
