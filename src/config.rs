//! Configuration for the support bot

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::ingestion::ChunkStrategy;

/// Main bot configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Model service configuration
    #[serde(default)]
    pub models: ModelConfig,
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// Vector store configuration
    #[serde(default)]
    pub store: StoreConfig,
}

impl BotConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::config(format!("cannot parse '{}': {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the given path, or fall back to defaults when no path is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(Error::config("chunking.chunk_size must be positive"));
        }
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(Error::config(format!(
                "chunking.chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunking.chunk_overlap, self.chunking.chunk_size
            )));
        }
        if self.retrieval.top_k == 0 {
            return Err(Error::config("retrieval.top_k must be at least 1"));
        }
        if self.store.collection.trim().is_empty() {
            return Err(Error::config("store.collection must not be empty"));
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Model service (Gemini) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Base URL of the Generative Language API
    pub api_base: String,
    /// Embedding model name
    pub embed_model: String,
    /// Generation model name
    pub generate_model: String,
    /// Temperature for generation (0.0 = deterministic decoding)
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries for failed requests (0 = single attempt)
    pub max_retries: u32,
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com".to_string(),
            embed_model: "embedding-001".to_string(),
            generate_model: "gemini-2.0-flash".to_string(),
            temperature: 0.0, // factual answers only
            timeout_secs: 60,
            max_retries: 0,
            api_key_env: default_api_key_env(),
        }
    }
}

fn default_api_key_env() -> String {
    "GOOGLE_API_KEY".to_string()
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters
    pub chunk_overlap: usize,
    /// Splitting strategy
    #[serde(default)]
    pub strategy: ChunkStrategy,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            chunk_overlap: 100,
            strategy: ChunkStrategy::default(),
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Number of passages to retrieve per query
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 3 }
    }
}

/// Vector store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding persisted collections
    pub persist_dir: PathBuf,
    /// Collection name for the product catalog index
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let persist_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gearbot")
            .join("index");

        Self {
            persist_dir,
            collection: "product_embeddings".to_string(),
        }
    }
}
