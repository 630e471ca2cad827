mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use application::registration_service::RegistrationService;
use data::user_repository::{JsonFileUserRepository, UserRepository};
use infrastructure::config::AppConfig;
use infrastructure::logging::init_logging;
use infrastructure::storage::ensure_store;
use presentation::handlers;
use presentation::middleware::RequestTracing;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env().context("invalid configuration")?;
    ensure_store(&config.users_file)
        .await
        .with_context(|| format!("failed to prepare {}", config.users_file.display()))?;

    let user_repo = Arc::new(JsonFileUserRepository::new(config.users_file.clone()));
    let existing = user_repo.list().await.context("failed to read user store")?;
    info!(path = %user_repo.path().display(), users = existing.len(), "user store ready");
    let registration_service = web::Data::new(RegistrationService::new(user_repo));

    let config_data = config.clone();
    info!(host = %config.host, port = config.port, "HTTP server starting");

    HttpServer::new(move || {
        let cors = build_cors(&config_data);
        App::new()
            .wrap(Logger::default())
            .wrap(RequestTracing)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer"))
                    .add(("Permissions-Policy", "geolocation=()"))
                    .add(("Cross-Origin-Opener-Policy", "same-origin")),
            )
            .wrap(cors)
            .app_data(registration_service.clone())
            .service(web::scope("/api").service(handlers::health::health))
            .configure(handlers::register::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![actix_web::http::header::CONTENT_TYPE])
        .max_age(3600);

    for origin in &config.cors_origins {
        cors = if origin == "*" {
            cors.allow_any_origin()
        } else {
            cors.allowed_origin(origin)
        };
    }

    cors
}
