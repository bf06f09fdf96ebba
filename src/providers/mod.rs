//! Provider abstractions for embeddings, generation, and vector storage
//!
//! The workflow never constructs a service itself; it receives these
//! handles, so tests can substitute deterministic stubs.

pub mod embedding;
pub mod gemini;
pub mod llm;
pub mod vector_store;

pub use embedding::EmbeddingProvider;
pub use gemini::GeminiClient;
pub use llm::LlmProvider;
pub use vector_store::VectorStoreProvider;
