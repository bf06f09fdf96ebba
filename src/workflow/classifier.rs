//! Query classification via a constrained model prompt

use std::sync::Arc;

use crate::generation::PromptBuilder;
use crate::providers::LlmProvider;
use crate::types::Category;

/// Classifies queries into product, returns, or general
///
/// The raw model output never leaves this type: whatever comes back is
/// normalized against the allowed label set, and anything unrecognized,
/// including a failed model call, lands on `general`.
pub struct Classifier {
    llm: Arc<dyn LlmProvider>,
}

impl Classifier {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Classify a query; infallible from the caller's point of view
    pub async fn classify(&self, query: &str) -> Category {
        let prompt = PromptBuilder::classification_prompt(query);
        match self.llm.generate(&prompt).await {
            Ok(raw) => {
                let category = normalize_label(&raw);
                tracing::info!("Classified as '{}' (raw: {:?})", category, raw.trim());
                category
            }
            Err(e) => {
                tracing::warn!("Classification call failed ({}), defaulting to 'general'", e);
                Category::General
            }
        }
    }
}

/// Trim, lowercase, strip quotes, then validate against the label set
fn normalize_label(raw: &str) -> Category {
    let lowered = raw.trim().to_lowercase();
    let label = lowered
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .trim();
    Category::from_label(label).unwrap_or_else(|| {
        tracing::warn!("Unrecognized category {:?}, coercing to 'general'", raw.trim());
        Category::General
    })
}
