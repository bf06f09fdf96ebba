//! Query-time retrieval and context assembly
//!
//! The retriever embeds the query, pulls the top ranked catalog chunks
//! from the vector store, and joins them into a single context block for
//! the generator. The response path must never die here: when the index
//! is empty or a service call fails, a static catalog summary stands in
//! so the bot can still answer the common questions.

use std::sync::Arc;

use crate::error::Result;
use crate::providers::{EmbeddingProvider, VectorStoreProvider};
use crate::types::SearchResult;

/// Catalog summary served when the index is empty or unreachable
pub const FALLBACK_CATALOG: &str = "\
TechGear Product Catalog (summary)

Product: SmartWatch Pro X
Price: ₹15,999
Features: Heart rate monitoring, GPS tracking, 5-day battery life, AMOLED display.

Product: Wireless Earbuds Elite
Price: ₹4,999
Features: Active noise cancellation, 24-hour battery with charging case, touch controls.

Product: PowerBank Ultra 20000mAh
Price: ₹2,499
Features: 20000mAh capacity, 22.5W fast charging, dual USB output.

Return policy: TechGear has a 7-day return policy. Products can be returned within 7 days of delivery for a full refund. Items must be unused and in original packaging.

Warranty: All products include a 1-year manufacturer warranty covering defects.

Shipping: Free shipping on orders above ₹999. Standard delivery takes 3-5 business days.";

/// Retrieves ranked catalog context for a query
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStoreProvider>,
    top_k: usize,
}

impl Retriever {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStoreProvider>,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            store,
            top_k,
        }
    }

    /// Build the context block for a query
    ///
    /// Returns the joined top-k chunk texts in rank order, or the static
    /// fallback catalog when the index is empty or any service call
    /// fails. This function never errors.
    pub async fn retrieve_context(&self, query: &str) -> String {
        match self.ranked_context(query).await {
            Ok(Some(context)) => context,
            Ok(None) => {
                tracing::warn!("Catalog index is empty, using fallback catalog");
                FALLBACK_CATALOG.to_string()
            }
            Err(e) => {
                tracing::warn!("Retrieval failed ({}), using fallback catalog", e);
                FALLBACK_CATALOG.to_string()
            }
        }
    }

    async fn ranked_context(&self, query: &str) -> Result<Option<String>> {
        if self.store.count().await? == 0 {
            return Ok(None);
        }

        let query_embedding = self.embedder.embed(query).await?;
        let results = self.store.search(&query_embedding, self.top_k).await?;
        if results.is_empty() {
            return Ok(None);
        }

        for (rank, result) in results.iter().enumerate() {
            tracing::debug!(
                "  {}. chunk {} (score {:.4})",
                rank + 1,
                result.chunk.ordinal,
                result.score
            );
        }

        Ok(Some(assemble_context(&results)))
    }
}

/// Join retrieved chunks into one context block, rank order preserved
///
/// Chunk texts are kept verbatim; overlapping tails from the chunker are
/// left in place rather than deduplicated.
pub(crate) fn assemble_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| r.chunk.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
