//! Core types shared across the bot

mod api;
mod chunk;
mod workflow;

pub use api::{ChatRequest, ChatResponse, HealthResponse, IndexHealth};
pub use chunk::{Chunk, IndexEntry, SearchResult};
pub use workflow::{Category, WorkflowState};
