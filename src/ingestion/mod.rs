//! Catalog ingestion: load, chunk, embed, persist
//!
//! Ingestion is an offline step run before the server starts answering
//! queries. A rerun replaces the collection rather than appending to it,
//! so indexing the same catalog twice never duplicates entries.

mod chunker;

pub use chunker::{ChunkStrategy, TextChunker};

use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, VectorStoreProvider};
use crate::types::IndexEntry;

/// Pipeline that rebuilds the catalog index from a source file
pub struct IngestPipeline {
    chunker: TextChunker,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStoreProvider>,
}

impl IngestPipeline {
    pub fn new(
        chunker: TextChunker,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStoreProvider>,
    ) -> Self {
        Self {
            chunker,
            embedder,
            store,
        }
    }

    /// Index a catalog file and return the number of chunks written
    ///
    /// The source is read, chunked, and embedded in full before the
    /// collection is touched; failures up to that point leave the
    /// existing index in place.
    pub async fn ingest(&self, source: &Path) -> Result<usize> {
        let label = source.display().to_string();
        tracing::info!("Loading catalog from {}", label);

        let text = std::fs::read_to_string(source)
            .map_err(|e| Error::ingestion(&label, format!("cannot read source: {}", e)))?;
        if text.trim().is_empty() {
            return Err(Error::ingestion(&label, "catalog file is empty"));
        }
        tracing::info!("Loaded {} characters", text.chars().count());

        let chunks = self.chunker.split(&text);
        if chunks.is_empty() {
            return Err(Error::ingestion(&label, "no chunks produced from catalog"));
        }
        tracing::info!("Split into {} chunks", chunks.len());

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = self
            .embedder
            .embed_batch(&texts)
            .await
            .map_err(|e| Error::ingestion(&label, format!("embedding failed: {}", e)))?;

        let entries: Vec<IndexEntry> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| IndexEntry::new(chunk, embedding))
            .collect();
        let indexed = entries.len();

        // Replace, not append: clear the collection before writing.
        self.store
            .clear()
            .await
            .map_err(|e| Error::ingestion(&label, format!("cannot clear collection: {}", e)))?;
        self.store
            .upsert(entries)
            .await
            .map_err(|e| Error::ingestion(&label, format!("cannot write entries: {}", e)))?;

        tracing::info!("Indexed {} chunks", indexed);
        Ok(indexed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LocalVectorStore;
    use async_trait::async_trait;
    use std::io::Write;

    struct CountingEmbedder;

    #[async_trait]
    impl EmbeddingProvider for CountingEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            Ok(vec![text.chars().count() as f32, 1.0])
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    fn pipeline_over(dir: &Path) -> IngestPipeline {
        let store = LocalVectorStore::open(dir, "test_catalog").unwrap();
        IngestPipeline::new(
            TextChunker::new(80, 10),
            Arc::new(CountingEmbedder),
            Arc::new(store),
        )
    }

    #[tokio::test]
    async fn missing_source_is_an_ingestion_error() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_over(dir.path());
        let err = pipeline.ingest(Path::new("no/such/catalog.txt")).await;
        assert!(matches!(err, Err(Error::Ingestion { .. })));
    }

    #[tokio::test]
    async fn empty_source_is_an_ingestion_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("empty.txt");
        std::fs::File::create(&source)
            .unwrap()
            .write_all(b"   \n\n  ")
            .unwrap();

        let pipeline = pipeline_over(dir.path());
        let err = pipeline.ingest(&source).await;
        assert!(matches!(err, Err(Error::Ingestion { .. })));
    }

    #[tokio::test]
    async fn rerun_replaces_instead_of_appending() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("catalog.txt");
        std::fs::write(
            &source,
            "Product: Widget\nPrice: 10\n\nProduct: Gadget\nPrice: 20\n",
        )
        .unwrap();

        let store = Arc::new(LocalVectorStore::open(dir.path(), "test_catalog").unwrap());
        let pipeline = IngestPipeline::new(
            TextChunker::new(80, 10),
            Arc::new(CountingEmbedder),
            Arc::clone(&store) as Arc<dyn VectorStoreProvider>,
        );

        let first = pipeline.ingest(&source).await.unwrap();
        let second = pipeline.ingest(&source).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(store.count().await.unwrap(), second);
    }
}
