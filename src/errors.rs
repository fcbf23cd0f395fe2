// src/errors.rs
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LogoError {
    #[error("{0}")]
    Validation(String),

    #[error("Failed to generate logos: {0}")]
    Generation(String),

    #[error("{0}")]
    Selection(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid provider: {0}")]
    InvalidProvider(String),

    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),
}

impl LogoError {
    fn label(&self) -> &'static str {
        match self {
            LogoError::Validation(_) => "Validation error",
            LogoError::Generation(_) => "AI service error",
            LogoError::Selection(_) => "Selection error",
            LogoError::Config(_) => "Configuration error",
            LogoError::InvalidProvider(_) => "Invalid provider",
            LogoError::SessionNotFound(_) => "Not found",
        }
    }
}

impl ResponseError for LogoError {
    fn error_response(&self) -> HttpResponse {
        let body = serde_json::json!({
            "error": self.label(),
            "message": self.to_string()
        });
        match self {
            LogoError::Validation(_) | LogoError::InvalidProvider(_) => {
                HttpResponse::BadRequest().json(body)
            }
            LogoError::Selection(_) => HttpResponse::Conflict().json(body),
            LogoError::SessionNotFound(_) => HttpResponse::NotFound().json(body),
            LogoError::Generation(_) => HttpResponse::ServiceUnavailable().json(body),
            LogoError::Config(_) => HttpResponse::InternalServerError().json(body),
        }
    }
}
