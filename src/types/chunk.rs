//! Chunk and index entry types

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A contiguous slice of source text, the unit of retrieval
///
/// Immutable once created. Identity is the position in the source
/// (`ordinal`) plus the content hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// The chunk text
    pub text: String,
    /// Zero-based position of this chunk in the source
    pub ordinal: u32,
    /// Hex SHA-256 of the text, recorded for staleness checks
    pub hash: String,
}

impl Chunk {
    /// Create a chunk, computing its content hash
    pub fn new(text: impl Into<String>, ordinal: u32) -> Self {
        let text = text.into();
        let hash = content_hash(&text);
        Self {
            text,
            ordinal,
            hash,
        }
    }

    /// Length of the chunk text in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Hex SHA-256 of a text
pub(crate) fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// A chunk paired with its embedding, as stored in a collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    /// The chunk
    pub chunk: Chunk,
    /// Embedding vector for the chunk text
    pub embedding: Vec<f32>,
}

impl IndexEntry {
    /// Pair a chunk with its embedding
    pub fn new(chunk: Chunk, embedding: Vec<f32>) -> Self {
        Self { chunk, embedding }
    }
}

/// A retrieved chunk with its similarity score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved chunk
    pub chunk: Chunk,
    /// Cosine similarity to the query vector
    pub score: f32,
}
