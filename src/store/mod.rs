//! Local vector store: one JSON file per collection
//!
//! The catalog index is small enough for an exact cosine scan, which also
//! keeps result order fully deterministic. A missing collection file is a
//! valid empty store, not an error.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::providers::VectorStoreProvider;
use crate::types::{IndexEntry, SearchResult};

/// On-disk collection format
#[derive(Serialize, Deserialize)]
struct CollectionFile {
    collection: String,
    saved_at: DateTime<Utc>,
    entries: Vec<IndexEntry>,
}

/// Flat-file vector store holding one named collection
pub struct LocalVectorStore {
    /// Collection name
    collection: String,
    /// Path of the persisted collection file
    path: PathBuf,
    /// In-memory entries, kept in insertion order
    entries: RwLock<Vec<IndexEntry>>,
}

impl LocalVectorStore {
    /// Open a collection, loading persisted entries when the file exists
    pub fn open(persist_dir: &Path, collection: &str) -> Result<Self> {
        std::fs::create_dir_all(persist_dir)?;
        let path = persist_dir.join(format!("{}.json", collection));

        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let file: CollectionFile = serde_json::from_str(&content).map_err(|e| {
                Error::vector_store(format!(
                    "corrupt collection file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            tracing::info!(
                "Loaded collection '{}' with {} entries",
                collection,
                file.entries.len()
            );
            file.entries
        } else {
            tracing::info!("Collection '{}' not found, starting empty", collection);
            Vec::new()
        };

        Ok(Self {
            collection: collection.to_string(),
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Open the collection named by the store config
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        Self::open(&config.persist_dir, &config.collection)
    }

    /// Collection name
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Write the current entries to the collection file
    fn persist(&self, entries: &[IndexEntry]) -> Result<()> {
        let file = CollectionFile {
            collection: self.collection.clone(),
            saved_at: Utc::now(),
            entries: entries.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[async_trait]
impl VectorStoreProvider for LocalVectorStore {
    async fn upsert(&self, new_entries: Vec<IndexEntry>) -> Result<()> {
        let mut entries = self.entries.write();
        entries.extend(new_entries);
        self.persist(&entries)?;
        tracing::debug!(
            "Collection '{}' persisted with {} entries",
            self.collection,
            entries.len()
        );
        Ok(())
    }

    async fn search(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
        let entries = self.entries.read();
        let mut results: Vec<SearchResult> = entries
            .iter()
            .map(|entry| SearchResult {
                chunk: entry.chunk.clone(),
                score: cosine_similarity(query_embedding, &entry.embedding),
            })
            .collect();

        // Stable sort: equal scores keep insertion order.
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        results.truncate(top_k);
        Ok(results)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.entries.read().len())
    }

    async fn clear(&self) -> Result<()> {
        let mut entries = self.entries.write();
        entries.clear();
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        tracing::info!("Collection '{}' cleared", self.collection);
        Ok(())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.path.parent().map(Path::exists).unwrap_or(false))
    }

    fn name(&self) -> &str {
        "local-json"
    }
}

/// Cosine similarity between two vectors
///
/// Mismatched dimensions and zero-magnitude vectors score 0 rather than
/// erroring, so one bad entry cannot poison a search.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Chunk;
    use tempfile::TempDir;

    fn entry(text: &str, ordinal: u32, embedding: Vec<f32>) -> IndexEntry {
        IndexEntry::new(Chunk::new(text, ordinal), embedding)
    }

    #[tokio::test]
    async fn missing_file_opens_an_empty_store() {
        let tmp = TempDir::new().unwrap();
        let store = LocalVectorStore::open(tmp.path(), "catalog").unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
        assert!(store.is_empty().await.unwrap());

        let results = store.search(&[1.0, 0.0], 3).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn search_returns_at_most_count_entries() {
        let tmp = TempDir::new().unwrap();
        let store = LocalVectorStore::open(tmp.path(), "catalog").unwrap();
        store
            .upsert(vec![
                entry("watch", 0, vec![1.0, 0.0]),
                entry("earbuds", 1, vec![0.0, 1.0]),
            ])
            .await
            .unwrap();

        let results = store.search(&[1.0, 0.0], 10).await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn best_similarity_comes_first() {
        let tmp = TempDir::new().unwrap();
        let store = LocalVectorStore::open(tmp.path(), "catalog").unwrap();
        store
            .upsert(vec![
                entry("earbuds", 0, vec![0.0, 1.0]),
                entry("watch", 1, vec![1.0, 0.0]),
            ])
            .await
            .unwrap();

        let results = store.search(&[1.0, 0.0], 2).await.unwrap();
        assert_eq!(results[0].chunk.text, "watch");
        assert!(results[0].score > 0.99);
        assert_eq!(results[1].chunk.text, "earbuds");
    }

    #[tokio::test]
    async fn ties_keep_insertion_order() {
        let tmp = TempDir::new().unwrap();
        let store = LocalVectorStore::open(tmp.path(), "catalog").unwrap();
        store
            .upsert(vec![
                entry("first", 0, vec![1.0, 0.0]),
                entry("second", 1, vec![1.0, 0.0]),
                entry("other", 2, vec![0.0, 1.0]),
            ])
            .await
            .unwrap();

        let results = store.search(&[1.0, 0.0], 3).await.unwrap();
        assert_eq!(results[0].chunk.text, "first");
        assert_eq!(results[1].chunk.text, "second");
        assert_eq!(results[2].chunk.text, "other");
    }

    #[tokio::test]
    async fn entries_survive_reopen() {
        let tmp = TempDir::new().unwrap();
        {
            let store = LocalVectorStore::open(tmp.path(), "catalog").unwrap();
            store
                .upsert(vec![entry("watch", 0, vec![1.0, 0.0, 0.5])])
                .await
                .unwrap();
        }

        let reopened = LocalVectorStore::open(tmp.path(), "catalog").unwrap();
        assert_eq!(reopened.count().await.unwrap(), 1);
        let results = reopened.search(&[1.0, 0.0, 0.5], 1).await.unwrap();
        assert_eq!(results[0].chunk.text, "watch");
    }

    #[tokio::test]
    async fn clear_removes_entries_and_file() {
        let tmp = TempDir::new().unwrap();
        let store = LocalVectorStore::open(tmp.path(), "catalog").unwrap();
        store
            .upsert(vec![entry("watch", 0, vec![1.0])])
            .await
            .unwrap();
        assert!(tmp.path().join("catalog.json").exists());

        store.clear().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
        assert!(!tmp.path().join("catalog.json").exists());

        let reopened = LocalVectorStore::open(tmp.path(), "catalog").unwrap();
        assert_eq!(reopened.count().await.unwrap(), 0);
    }

    #[test]
    fn cosine_handles_degenerate_vectors() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert!((cosine_similarity(&[1.0, 2.0], &[1.0, 2.0]) - 1.0).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[0.0, 1.0])).abs() < 1e-6);
    }
}
