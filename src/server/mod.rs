//! HTTP surface for the support bot

pub mod routes;
pub mod state;

use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::BotConfig;
use crate::error::{Error, Result};
use crate::server::state::AppState;

/// The chatbot HTTP server
pub struct BotServer {
    config: BotConfig,
    state: AppState,
}

impl BotServer {
    /// Create a server, wiring all providers from the configuration
    pub fn new(config: BotConfig) -> Result<Self> {
        let state = AppState::new(config.clone())?;
        Ok(Self { config, state })
    }

    /// Address the server binds, as `host:port`
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }

    fn build_router(&self) -> Router {
        // The demo frontend is served from arbitrary origins.
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/", get(routes::root))
            .route("/health", get(routes::health))
            .route("/chat", post(routes::chat))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = self
            .address()
            .parse()
            .map_err(|e| Error::config(format!("invalid listen address: {}", e)))?;

        let router = self.build_router();
        tracing::info!("Chatbot server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).await?;
        Ok(())
    }
}
