//! Error types for the support bot

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for bot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Support bot errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request validation error
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Ingestion error, fatal to the offline caller
    #[error("Ingestion of '{path}' failed: {message}")]
    Ingestion { path: String, message: String },

    /// Embedding service error
    #[error("Embedding service error: {0}")]
    Embedding(String),

    /// Generative model error
    #[error("Generation service error: {0}")]
    Generation(String),

    /// Vector store error
    #[error("Vector store error: {0}")]
    VectorStore(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an ingestion error
    pub fn ingestion(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Ingestion {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an embedding service error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a generation service error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    /// Create a vector store error
    pub fn vector_store(message: impl Into<String>) -> Self {
        Self::VectorStore(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            Error::Config(msg) => (StatusCode::BAD_REQUEST, "config_error", msg.clone()),
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            Error::Ingestion { path, message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "ingestion_error",
                format!("Ingestion of '{}' failed: {}", path, message),
            ),
            Error::Embedding(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "embedding_error", msg.clone())
            }
            Error::Generation(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "generation_error", msg.clone())
            }
            Error::VectorStore(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "vector_store_error", msg.clone())
            }
            Error::Io(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
                err.to_string(),
            ),
            Error::Json(err) => (StatusCode::BAD_REQUEST, "json_error", err.to_string()),
            Error::Http(err) => (StatusCode::BAD_GATEWAY, "http_error", err.to_string()),
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
