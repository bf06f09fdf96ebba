//! Vector store provider trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{IndexEntry, SearchResult};

/// Trait for storing embedded chunks and searching them by similarity
///
/// Implementations:
/// - `LocalVectorStore`: one JSON file per collection, exact cosine scan
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// Append entries to the collection and persist them
    async fn upsert(&self, entries: Vec<IndexEntry>) -> Result<()>;

    /// Return up to `top_k` entries, best similarity first
    ///
    /// Returns fewer when the collection holds fewer entries, and an empty
    /// list for an empty collection; neither is an error. Ties keep
    /// insertion order.
    async fn search(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<SearchResult>>;

    /// Number of stored entries
    async fn count(&self) -> Result<usize>;

    /// Check if the collection is empty without running a search
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.count().await? == 0)
    }

    /// Remove all entries and the persisted collection file
    async fn clear(&self) -> Result<()>;

    /// Check if the store is usable
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
