//! Answer generation over retrieved context

mod prompt;

pub use prompt::PromptBuilder;

use std::sync::Arc;

use crate::error::Result;
use crate::providers::LlmProvider;

/// Generates grounded answers from a context block and a question
pub struct Generator {
    llm: Arc<dyn LlmProvider>,
}

impl Generator {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Answer a question using only the supplied context
    pub async fn generate(&self, context: &str, question: &str) -> Result<String> {
        let prompt = PromptBuilder::qa_prompt(context, question);
        let answer = self.llm.generate(&prompt).await?;
        Ok(answer.trim().to_string())
    }
}
