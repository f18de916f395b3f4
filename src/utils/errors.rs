//! Sistema de manejo de errores
//!
//! Este módulo define los errores tipados del gestor de rosters
//! (`FleetError`) y los errores de la consola (`AppError`) junto con su
//! conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{error, warn};

/// Errores del gestor de rosters y emparejamientos
#[derive(Error, Debug)]
pub enum FleetError {
    /// Fallo de red, status no-2xx o payload mal formado
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Validación local por campo; nunca llega a la red
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Pairing conflict: {0}")]
    PairingConflict(String),

    #[error("Pairing in progress: {0}")]
    PairingInProgress(String),

    #[error("Pairing error: {0}")]
    Pairing(String),

    #[error("Block error: {0}")]
    Block(String),

    #[error("Delete error: {0}")]
    Delete(String),

    #[error("Record error: {0}")]
    Record(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

impl From<reqwest::Error> for FleetError {
    fn from(e: reqwest::Error) -> Self {
        FleetError::Fetch(e.to_string())
    }
}

/// Resultado tipado para operaciones del gestor de rosters
pub type FleetResult<T> = Result<T, FleetError>;

/// Errores principales de la consola
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Fleet(#[from] FleetError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("JWT error: {0}")]
    Jwt(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl ErrorResponse {
    fn new(error: &str, message: String, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message,
            details: None,
            code: Some(code.to_string()),
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Fleet(FleetError::Fetch(msg)) => {
                error!("❌ Error comunicando con el backend: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::new(
                        "Fetch Error",
                        "An error occurred while communicating with the fleet backend".to_string(),
                        "FETCH_ERROR",
                    )
                    .with_details(json!({ "fetch_error": msg })),
                )
            }

            AppError::Fleet(FleetError::Validation(e)) => {
                warn!("⚠️ Validación fallida: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(
                        "Validation Error",
                        "The provided data is invalid".to_string(),
                        "VALIDATION_ERROR",
                    )
                    .with_details(json!(field_messages(&e))),
                )
            }

            AppError::Fleet(FleetError::PairingConflict(msg)) => {
                warn!("⚠️ Conflicto de emparejamiento: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse::new("Pairing Conflict", msg, "PAIRING_CONFLICT"),
                )
            }

            AppError::Fleet(FleetError::PairingInProgress(msg)) => {
                warn!("⏳ Emparejamiento en curso: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse::new("Pairing In Progress", msg, "PAIRING_IN_PROGRESS"),
                )
            }

            AppError::Fleet(FleetError::Pairing(msg)) => {
                warn!("⚠️ Emparejamiento rechazado: {}", msg);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse::new("Pairing Error", msg, "PAIRING_ERROR"),
                )
            }

            AppError::Fleet(FleetError::Block(msg)) => {
                warn!("⚠️ Bloqueo rechazado: {}", msg);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse::new("Block Error", msg, "BLOCK_ERROR"),
                )
            }

            AppError::Fleet(FleetError::Delete(msg)) => {
                warn!("⚠️ Borrado rechazado: {}", msg);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse::new("Delete Error", msg, "DELETE_ERROR"),
                )
            }

            AppError::Fleet(FleetError::Record(msg)) => {
                warn!("⚠️ Registro rechazado: {}", msg);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse::new("Record Error", msg, "RECORD_ERROR"),
                )
            }

            AppError::Fleet(FleetError::Unsupported(msg)) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Unsupported Operation", msg, "UNSUPPORTED"),
            ),

            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Bad Request", msg, "BAD_REQUEST"),
            ),

            AppError::Jwt(msg) => {
                warn!("🔒 Error JWT: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse::new("JWT Error", msg, "JWT_ERROR"),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para los handlers de la consola
pub type AppResult<T> = Result<T, AppError>;

/// Mensajes de validación agrupados por campo, listos para mostrarse en
/// línea junto a cada input del formulario
pub fn field_messages(errors: &validator::ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            let messages = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// Función helper para crear errores de validación de un solo campo
pub fn validation_error(field: &'static str, message: &'static str) -> FleetError {
    let mut error = validator::ValidationError::new("custom");
    error.message = Some(message.into());

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    FleetError::Validation(errors)
}
