//! Prompt templates for answering and classification
//!
//! Both templates constrain the model hard: the answer prompt forbids
//! knowledge outside the retrieved context, and the classification prompt
//! demands a bare quoted label. Loosening either wording changes observable
//! behavior, so the templates live here as the single source of truth.

/// Builds the prompts sent to the generation model
pub struct PromptBuilder;

impl PromptBuilder {
    /// Grounded question-answering prompt
    ///
    /// Instructs the model to answer only from the supplied context and to
    /// admit ignorance with a fixed phrase instead of guessing.
    pub fn qa_prompt(context: &str, question: &str) -> String {
        format!(
            "Answer ONLY using the provided context. If the answer is not in the context, say \"I don't have this information.\"\n\
             \n\
             Context:\n\
             {context}\n\
             \n\
             Question: {question}\n\
             \n\
             Answer:"
        )
    }

    /// Constrained classification prompt
    ///
    /// The model must reply with exactly one quoted label out of product,
    /// returns, or general. The classifier still normalizes the output, so
    /// a chatty model cannot leak raw text into routing.
    pub fn classification_prompt(query: &str) -> String {
        format!(
            "Categorize this query into EXACTLY ONE of these categories:\n\
             \n\
             Categories:\n\
             - \"product\": Questions about product prices, features, specifications\n\
             - \"returns\": Questions about return policy, refunds, warranty\n\
             - \"general\": Other questions or general inquiries\n\
             \n\
             Query: {query}\n\
             \n\
             Respond with ONLY the category name in quotes (e.g., \"product\" or \"returns\").\n\
             Do not include any other text."
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qa_prompt_embeds_context_and_question() {
        let prompt = PromptBuilder::qa_prompt(
            "SmartWatch Pro X costs ₹15,999",
            "What is the price of SmartWatch Pro X?",
        );
        assert!(prompt.contains("Context:\nSmartWatch Pro X costs ₹15,999"));
        assert!(prompt.contains("Question: What is the price of SmartWatch Pro X?"));
        assert!(prompt.ends_with("Answer:"));
    }

    #[test]
    fn qa_prompt_carries_the_ignorance_phrase() {
        let prompt = PromptBuilder::qa_prompt("ctx", "q");
        assert!(prompt.contains("I don't have this information."));
        assert!(prompt.starts_with("Answer ONLY using the provided context."));
    }

    #[test]
    fn classification_prompt_lists_all_three_labels() {
        let prompt = PromptBuilder::classification_prompt("Can I return items within 7 days?");
        assert!(prompt.contains("\"product\""));
        assert!(prompt.contains("\"returns\""));
        assert!(prompt.contains("\"general\""));
        assert!(prompt.contains("Query: Can I return items within 7 days?"));
        assert!(prompt.ends_with("Do not include any other text."));
    }
}
