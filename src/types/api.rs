//! Request and response bodies for the HTTP surface

use serde::{Deserialize, Serialize};

/// Body of `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The customer's question
    pub query: String,
}

/// Response of `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Echo of the question
    pub query: String,
    /// The bot's answer
    pub response: String,
}

/// Response of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// Service name
    pub service: String,
    /// State of the catalog index
    pub index: IndexHealth,
    /// Operator hint
    pub message: String,
}

/// Catalog index state reported by `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexHealth {
    /// Collection name
    pub collection: String,
    /// Number of indexed entries
    pub entries: usize,
    /// Whether the index can serve retrieval
    pub ready: bool,
}
