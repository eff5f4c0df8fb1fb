//! Chat Provider Trait
//!
//! Trait-based abstraction over chat-completion services. The pipeline only
//! ever needs one operation: hand a prompt to the model and get the raw text
//! of the first choice back.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    /// System message (sets behavior/context)
    System,
    /// User message (query or input)
    User,
    /// Assistant message (response)
    Assistant,
}

impl MessageRole {
    /// Wire name used by chat-completion APIs
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Message role
    pub role: MessageRole,
    /// Message content
    pub content: String,
}

impl Message {
    /// Create a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Trait for chat-completion providers
///
/// Every prompt in the pipeline goes out through this trait, which lets
/// tests substitute canned or counting doubles for the real API.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a single prompt and return the raw text of the first choice.
    ///
    /// Errors propagate uncaught: no retry happens at this layer, and batch
    /// callers collect failures per task instead of aborting siblings.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Get the provider name
    fn provider_name(&self) -> &str;

    /// Check if the provider has an API key configured
    fn has_api_key(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let system_msg = Message::system("You are a French teacher");
        assert_eq!(system_msg.role, MessageRole::System);

        let user_msg = Message::user("Conjugate être");
        assert_eq!(user_msg.role, MessageRole::User);
        assert_eq!(user_msg.content, "Conjugate être");
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(MessageRole::System.as_str(), "system");
        assert_eq!(MessageRole::User.as_str(), "user");
        assert_eq!(MessageRole::Assistant.as_str(), "assistant");
    }
}
