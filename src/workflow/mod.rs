//! Workflow coordinator: the state machine behind every chat turn
//!
//! A query walks a fixed node sequence: greeting check, classification,
//! routing, then either a retrieval-backed answer or escalation. The
//! coordinator owns no service construction; it is handed provider
//! handles, so a turn is a function of the query and its injected
//! services with all per-request data in one [`WorkflowState`].

mod classifier;
mod greeting;

pub use classifier::Classifier;
pub use greeting::{is_greeting, GreetingRotation, GREETING_RESPONSES, GREETING_TOKENS};

use std::sync::Arc;

use crate::generation::Generator;
use crate::providers::{EmbeddingProvider, LlmProvider, VectorStoreProvider};
use crate::retrieval::Retriever;
use crate::types::{Category, WorkflowState};

/// Marker returned when a run somehow ends without a response
pub const NO_RESPONSE_MARKER: &str = "No response generated";

/// Message shown to the user when a query is escalated
pub const ESCALATION_MESSAGE: &str = "Your query has been escalated to human support. \
A support representative will assist you shortly. Ticket ID: SUPPORT-2026-001";

/// Routing knobs for the classify step's outcome
///
/// By default every category goes to the responder, which leaves the
/// escalation node wired but unreachable. Setting `escalate_general`
/// sends `general` queries to human support instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoutingOptions {
    pub escalate_general: bool,
}

/// Nodes of the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Greeting,
    Classify,
    Route,
    Respond,
    Escalate,
    End,
}

/// Sequences one chat turn through the workflow nodes
pub struct Workflow {
    classifier: Classifier,
    retriever: Retriever,
    generator: Generator,
    greetings: GreetingRotation,
    routing: RoutingOptions,
}

impl Workflow {
    /// Build a workflow with default routing and greeting rotation
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
        store: Arc<dyn VectorStoreProvider>,
        top_k: usize,
    ) -> Self {
        Self::with_options(
            embedder,
            llm,
            store,
            top_k,
            RoutingOptions::default(),
            GreetingRotation::new(),
        )
    }

    /// Build a workflow with explicit routing and rotation state
    pub fn with_options(
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
        store: Arc<dyn VectorStoreProvider>,
        top_k: usize,
        routing: RoutingOptions,
        greetings: GreetingRotation,
    ) -> Self {
        Self {
            classifier: Classifier::new(Arc::clone(&llm)),
            retriever: Retriever::new(embedder, store, top_k),
            generator: Generator::new(llm),
            greetings,
            routing,
        }
    }

    /// Run the state machine and return the final per-turn state
    pub async fn process(&self, query: &str) -> WorkflowState {
        let mut state = WorkflowState::new(query);
        let mut node = Node::Greeting;

        while node != Node::End {
            node = match node {
                Node::Greeting => self.greeting_node(&mut state),
                Node::Classify => self.classify_node(&mut state).await,
                Node::Route => self.route_node(&state),
                Node::Respond => self.respond_node(&mut state).await,
                Node::Escalate => self.escalate_node(&mut state),
                Node::End => Node::End,
            };
        }

        state
    }

    /// Process one query and return the response text
    ///
    /// Always yields a non-empty string; a run that ends without any node
    /// writing a response returns the literal marker.
    pub async fn process_query(&self, query: &str) -> String {
        let state = self.process(query).await;
        if state.response.is_empty() {
            return NO_RESPONSE_MARKER.to_string();
        }
        state.response
    }

    /// Greeting pre-step; answers without touching the models
    fn greeting_node(&self, state: &mut WorkflowState) -> Node {
        state.is_greeting = is_greeting(&state.query);
        if !state.is_greeting {
            return Node::Classify;
        }

        state.category = Category::Greeting;
        state.response = self.greetings.next_greeting().to_string();
        tracing::info!("Greeting detected, skipping classification");
        Node::End
    }

    async fn classify_node(&self, state: &mut WorkflowState) -> Node {
        state.category = self.classifier.classify(&state.query).await;
        Node::Route
    }

    /// Pure function of the category
    ///
    /// Every category routes to the responder unless `escalate_general`
    /// opts `general` queries into the escalation path.
    fn route_node(&self, state: &WorkflowState) -> Node {
        if self.routing.escalate_general && state.category == Category::General {
            tracing::info!("Routing '{}' to escalation", state.category);
            return Node::Escalate;
        }
        tracing::info!("Routing '{}' to responder", state.category);
        Node::Respond
    }

    /// Retrieval plus generation; failures become an apologetic response
    async fn respond_node(&self, state: &mut WorkflowState) -> Node {
        let context = self.retriever.retrieve_context(&state.query).await;
        state.response = match self.generator.generate(&context, &state.query).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("Responder failed: {}", e);
                format!("I encountered an error while processing your query: {}", e)
            }
        };
        Node::End
    }

    fn escalate_node(&self, state: &mut WorkflowState) -> Node {
        state.escalation_reason = format!("Complex query in category: {}", state.category);
        state.response = ESCALATION_MESSAGE.to_string();
        tracing::info!("Escalated: {}", state.escalation_reason);
        Node::End
    }
}
