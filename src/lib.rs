//! gearbot: customer-support chatbot for the TechGear product catalog
//!
//! Combines two pieces:
//!
//! - A workflow state machine that sequences every chat turn through
//!   greeting detection, query classification, and routing to either a
//!   retrieval-backed answer or escalation.
//! - A retrieval pipeline: catalog text is chunked, embedded via the
//!   Gemini API, and persisted in a local vector store; at query time the
//!   top-ranked chunks become the context for a grounded answer.
//!
//! Model services and the vector store sit behind provider traits
//! ([`providers::EmbeddingProvider`], [`providers::LlmProvider`],
//! [`providers::VectorStoreProvider`]) so the workflow stays testable
//! with stub services.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod store;
pub mod types;
pub mod workflow;

pub use config::BotConfig;
pub use error::{Error, Result};
pub use server::BotServer;
pub use types::{Category, ChatRequest, ChatResponse, Chunk, IndexEntry, WorkflowState};
pub use workflow::Workflow;
