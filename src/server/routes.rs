//! HTTP endpoint handlers

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{ChatRequest, ChatResponse, HealthResponse, IndexHealth};

/// POST /chat
///
/// The only validation at the transport boundary is the empty-query
/// check; past that, whatever the workflow produces goes back with 200.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    if request.query.trim().is_empty() {
        return Err(Error::validation(
            "Query cannot be empty. Please provide a question.",
        ));
    }

    tracing::info!("Chat request: {:?}", request.query);
    let response = state.workflow().process_query(&request.query).await;

    Ok(Json(ChatResponse {
        query: request.query,
        response,
    }))
}

/// GET /health
///
/// Reports service liveness plus index readiness. An empty index still
/// answers (the retriever falls back), so the status is `degraded`
/// rather than an error.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let collection = state.config().store.collection.clone();
    let entries = state.store().count().await.unwrap_or(0);
    let ready = entries > 0;

    let message = if ready {
        "Send POST requests to /chat with your questions".to_string()
    } else {
        "Catalog index is empty; run gearbot-ingest to index the product catalog".to_string()
    };

    Json(HealthResponse {
        status: if ready { "healthy" } else { "degraded" }.to_string(),
        service: "gearbot".to_string(),
        index: IndexHealth {
            collection,
            entries,
            ready,
        },
        message,
    })
}

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "gearbot",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "TechGear support chatbot: query routing with retrieval-augmented answers",
        "endpoints": {
            "POST /chat": "Ask a question about products, returns, or anything else",
            "GET /health": "Service and index health",
            "GET /": "This banner",
        },
    }))
}
