//! Embedding provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for mapping text to embedding vectors
///
/// Implementations:
/// - `GeminiClient`: Google Generative Language API (embedding-001)
/// - test stubs with deterministic vectors
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed multiple texts, preserving input order
    ///
    /// Default implementation calls `embed` sequentially; implementations
    /// with a batch endpoint should override it.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    /// Check if the provider is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
