// src/main.rs
use actix_web::{App, HttpResponse, HttpServer, middleware, web};
use anyhow::Context;
use log::info;
use std::sync::Arc;

mod config;
mod errors;
mod handlers;
mod models;
mod services;
mod wizard;

use crate::config::AppConfig;
use crate::errors::LogoError;
use crate::handlers::{
    catalog, create_session, delete_session, download_logo, get_session, image_prompt, post_event,
};
use crate::services::{ConceptService, SessionService, llm_service};

#[derive(Clone)]
pub struct AppState {
    sessions: Arc<SessionService>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting logo wizard service...");

    let config = AppConfig::from_env().context("failed to load configuration")?;

    // Initialize services
    let model = llm_service::from_config(&config.llm);
    info!("Using {} model {}", model.name(), config.llm.model);
    let concepts = Arc::new(ConceptService::new(model, config.concept_count));
    let sessions = Arc::new(SessionService::new(
        concepts,
        config.generation_timeout,
        config.session_ttl,
    ));

    let app_state = AppState { sessions };

    info!("Starting HTTP server on {}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(&config.bind_addr)
    .with_context(|| format!("failed to bind {}", config.bind_addr))?
    .run()
    .await?;

    Ok(())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| LogoError::Validation(err.to_string()).into()),
    )
    .service(
        web::scope("/api/v1")
            .route("/catalog", web::get().to(catalog))
            .route("/sessions", web::post().to(create_session))
            .route("/sessions/{session_id}", web::get().to(get_session))
            .route("/sessions/{session_id}", web::delete().to(delete_session))
            .route("/sessions/{session_id}/events", web::post().to(post_event))
            .route(
                "/sessions/{session_id}/download/{format}",
                web::post().to(download_logo),
            )
            .route(
                "/sessions/{session_id}/options/{option_id}/prompt",
                web::post().to(image_prompt),
            ),
    )
    .route("/health", web::get().to(health_check));
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "logo-wizard",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
