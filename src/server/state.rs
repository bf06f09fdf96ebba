//! Shared application state for the HTTP handlers

use std::sync::Arc;

use crate::config::BotConfig;
use crate::error::Result;
use crate::providers::{EmbeddingProvider, GeminiClient, LlmProvider, VectorStoreProvider};
use crate::store::LocalVectorStore;
use crate::workflow::Workflow;

/// Handler state; cheap to clone, all shared data behind one `Arc`
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: BotConfig,
    store: Arc<dyn VectorStoreProvider>,
    workflow: Workflow,
}

impl AppState {
    /// Wire providers and the workflow from the configuration
    ///
    /// Fails when the configuration is invalid, the API key environment
    /// variable is unset, or the persisted index cannot be opened.
    pub fn new(config: BotConfig) -> Result<Self> {
        config.validate()?;

        let gemini = Arc::new(GeminiClient::new(&config.models)?);
        let embedder: Arc<dyn EmbeddingProvider> = gemini.clone();
        let llm: Arc<dyn LlmProvider> = gemini;
        let store: Arc<dyn VectorStoreProvider> =
            Arc::new(LocalVectorStore::from_config(&config.store)?);

        let workflow = Workflow::new(
            embedder,
            llm,
            Arc::clone(&store),
            config.retrieval.top_k,
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                workflow,
            }),
        })
    }

    pub fn config(&self) -> &BotConfig {
        &self.inner.config
    }

    pub fn workflow(&self) -> &Workflow {
        &self.inner.workflow
    }

    pub fn store(&self) -> &dyn VectorStoreProvider {
        self.inner.store.as_ref()
    }
}
