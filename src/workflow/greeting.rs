//! Greeting detection and canned responses
//!
//! Greetings never reach the models. Detection is a substring match over
//! the trimmed, lowercased query, so a token like "hi" also triggers
//! inside longer words. Callers rely on that exact behavior.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Tokens that mark a query as a greeting
pub const GREETING_TOKENS: [&str; 11] = [
    "hello",
    "hi",
    "hey",
    "hiya",
    "greetings",
    "wassup",
    "what's up",
    "how are you",
    "howdy",
    "namaste",
    "salaam",
];

/// Canned greeting responses, served in rotation
pub const GREETING_RESPONSES: [&str; 5] = [
    "👋 Hello there! Welcome to TechGear! How can I help you today?",
    "🎉 Hi! Great to see you! Looking for tech products or information?",
    "😊 Hey! Welcome to TechGear support. What can I assist you with?",
    "👋 Hello! I'm here to help. Ask me about our products, pricing, or policies!",
    "🤖 Hi there! I'm TechGear's AI assistant. How can I serve you?",
];

/// Check whether a query contains a greeting token
pub fn is_greeting(query: &str) -> bool {
    let query = query.trim().to_lowercase();
    GREETING_TOKENS.iter().any(|token| query.contains(token))
}

/// Rotation over the canned greetings
///
/// The cursor advances on every greeting served. Tests pin the starting
/// position with [`GreetingRotation::starting_at`] to keep responses
/// deterministic.
pub struct GreetingRotation {
    cursor: AtomicUsize,
}

impl GreetingRotation {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Rotation pinned to a starting position
    pub fn starting_at(start: usize) -> Self {
        Self {
            cursor: AtomicUsize::new(start % GREETING_RESPONSES.len()),
        }
    }

    /// Next greeting in the rotation
    pub fn next_greeting(&self) -> &'static str {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        GREETING_RESPONSES[index % GREETING_RESPONSES.len()]
    }
}

impl Default for GreetingRotation {
    fn default() -> Self {
        Self::new()
    }
}
