mod api;
mod config;
mod email;
mod error;
mod models;
mod repo;
mod validation;

use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::AppState;
use crate::email::Mailer;
use crate::repo::PgClientRepository;

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = config::init()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Initialize database connection and apply migrations
    let pool = repo::connect(&config).await?;
    info!("database connection established");

    let state = web::Data::new(AppState {
        repo: Arc::new(PgClientRepository::new(pool)),
        mailer: Arc::new(Mailer::from_config(&config)?),
    });

    let bind_addr = config.bind_addr();
    info!("starting server on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(api::configure)
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
