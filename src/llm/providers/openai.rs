//! OpenAI API Provider
//!
//! Implements the ChatProvider trait against OpenAI's chat-completions
//! endpoint.

use crate::error::{Result, VerbForgeError};
use crate::llm::client::HttpClient;
use crate::llm::provider::{ChatProvider, Message};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// OpenAI API base URL
const OPENAI_API_BASE: &str = "https://api.openai.com/v1/chat/completions";

/// Default model when none is configured
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// OpenAI chat-completion provider
pub struct OpenAiProvider {
    /// API key for authentication
    api_key: String,
    /// Model identifier (e.g., "gpt-3.5-turbo", "gpt-4o-mini")
    model: String,
    /// HTTP client for making requests
    client: HttpClient,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider
    ///
    /// # Arguments
    /// * `api_key` - OpenAI API key
    /// * `model` - Model identifier (defaults to gpt-3.5-turbo)
    pub fn new(api_key: impl Into<String>, model: Option<String>) -> Result<Self> {
        Ok(Self {
            api_key: api_key.into(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            client: HttpClient::new()?,
        })
    }

    /// Convert messages to the OpenAI wire format
    fn to_wire(messages: &[Message]) -> Vec<WireMessage> {
        messages
            .iter()
            .map(|msg| WireMessage {
                role: msg.role.as_str().to_string(),
                content: msg.content.clone(),
            })
            .collect()
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        // Every request carries a single user-role message.
        let messages = vec![Message::user(prompt)];

        let request = ChatRequest {
            model: self.model.clone(),
            messages: Self::to_wire(&messages),
        };

        let headers = HttpClient::bearer_headers(&self.api_key)?;
        let response_text = self
            .client
            .post_json(OPENAI_API_BASE, headers, &request, self.provider_name())
            .await?;

        let response: ChatResponse = serde_json::from_str(&response_text).map_err(|e| {
            VerbForgeError::Api {
                provider: self.provider_name().to_string(),
                status: 0,
                message: format!("Failed to parse response envelope: {}", e),
            }
        })?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                VerbForgeError::MalformedResponse("response contained no choices".to_string())
            })
    }

    fn provider_name(&self) -> &str {
        "OpenAI"
    }

    fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// OpenAI API request format
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<WireMessage>,
}

/// OpenAI API message format
#[derive(Debug, Serialize)]
struct WireMessage {
    role: String,
    content: String,
}

/// OpenAI API response format
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

/// Choice in an OpenAI response
#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

/// Message in an OpenAI response choice
#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}
