//! Workflow state carried through the coordinator

use serde::{Deserialize, Serialize};
use std::fmt;

/// Query category assigned during the workflow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Product prices, features, specifications
    Product,
    /// Return policy, refunds, warranty
    Returns,
    /// Anything else
    General,
    /// Greeting, answered without the model
    Greeting,
    /// Not yet classified
    #[default]
    Unset,
}

impl Category {
    /// Parse a cleaned classification label
    ///
    /// Only the three classifiable labels are accepted; greetings are
    /// detected before classification and `unset` is never a model output.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "product" => Some(Self::Product),
            "returns" => Some(Self::Returns),
            "general" => Some(Self::General),
            _ => None,
        }
    }

    /// Lowercase label for logs and prompts
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Returns => "returns",
            Self::General => "general",
            Self::Greeting => "greeting",
            Self::Unset => "unset",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-request state flowing through the workflow nodes
///
/// Created at the start of `process_query`, discarded at the end. Each
/// node reads prior fields and writes the fields it owns; no two requests
/// share a state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowState {
    /// The incoming query, as received
    pub query: String,
    /// Category assigned by greeting detection or classification
    pub category: Category,
    /// Final response text
    pub response: String,
    /// Reason recorded when a query is escalated
    pub escalation_reason: String,
    /// Whether the greeting pre-step matched
    pub is_greeting: bool,
}

impl WorkflowState {
    /// Fresh state for an incoming query
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            category: Category::Unset,
            response: String::new(),
            escalation_reason: String::new(),
            is_greeting: false,
        }
    }
}
