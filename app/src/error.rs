//! Error handling for Boom Art Sales
//!
//! Every error carries an English message for logs and a Spanish message
//! for the person at the counter.

use serde::Serialize;
use shared::FieldError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not logged in")]
    NotAuthenticated,

    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_es: String,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Collaborator errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Assistant error: {0}")]
    Assistant(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Error detail shown to the user
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_es: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    pub fn detail(&self) -> ErrorDetail {
        let (code, message_es, field) = match self {
            AppError::InvalidCredentials => (
                "INVALID_CREDENTIALS",
                "Credenciales incorrectas".to_string(),
                None,
            ),
            AppError::NotAuthenticated => (
                "NOT_AUTHENTICATED",
                "Debes ingresar primero (boom-sales login)".to_string(),
                None,
            ),
            AppError::Validation {
                field, message_es, ..
            } => ("VALIDATION_ERROR", message_es.clone(), Some(field.clone())),
            AppError::NotFound(resource) => {
                ("NOT_FOUND", format!("No se encontró {}", resource), None)
            }
            AppError::Storage(msg) => (
                "STORAGE_ERROR",
                format!("Error de almacenamiento: {}", msg),
                None,
            ),
            AppError::Assistant(_) => (
                "ASSISTANT_ERROR",
                "Hubo un error al conectar con el asistente inteligente.".to_string(),
                None,
            ),
            AppError::Export(msg) => (
                "EXPORT_ERROR",
                format!("No se pudo exportar: {}", msg),
                None,
            ),
            AppError::Configuration(msg) => (
                "CONFIGURATION_ERROR",
                format!("Error de configuración: {}", msg),
                None,
            ),
        };

        ErrorDetail {
            code: code.to_string(),
            message_en: self.to_string(),
            message_es,
            field,
        }
    }

    pub fn message_es(&self) -> String {
        self.detail().message_es
    }
}

impl From<FieldError> for AppError {
    fn from(err: FieldError) -> Self {
        let message_es = match (err.field.as_str(), err.code.as_str()) {
            ("buyer_phone", _) => "El teléfono debe tener 9 dígitos".to_string(),
            ("buyer_name", _) => "El nombre del cliente es obligatorio".to_string(),
            ("product", _) => "El producto es obligatorio".to_string(),
            ("date", "required") => "La fecha es obligatoria".to_string(),
            ("date", _) => "La fecha debe tener el formato AAAA-MM-DD".to_string(),
            ("price", "required") => "El precio es obligatorio".to_string(),
            ("price", _) | ("cost", _) => "Los montos no pueden ser negativos".to_string(),
            _ => format!("Dato inválido: {}", err.field),
        };

        AppError::Validation {
            field: err.field,
            message: err.message,
            message_es,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Storage(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

/// Result type alias for services and commands
pub type AppResult<T> = Result<T, AppError>;
