//! Generative model provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for prompt-in, text-out generation
///
/// Callers own their prompt templates (see `generation::PromptBuilder`);
/// the provider only runs the model. Implementations:
/// - `GeminiClient`: Google Generative Language API (gemini-2.0-flash)
/// - test stubs with canned or echoed replies
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run the model on a finished prompt and return its raw text output
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Check if the provider is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// The model being used
    fn model(&self) -> &str;
}
