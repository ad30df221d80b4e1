/*!
 * Completion provider implementations.
 *
 * This module contains the client seam the translation pipeline talks to:
 * - OpenAI: chat-completion client for OpenAI-compatible APIs
 * - Mock: configurable test double with request capture
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for chat-completion providers
///
/// The pipeline holds its provider through this trait, so tests can
/// substitute a mock for the real HTTP client.
#[async_trait]
pub trait CompletionProvider: Send + Sync + Debug {
    /// Complete a chat request
    ///
    /// # Arguments
    /// * `request` - The chat request to complete
    ///
    /// # Returns
    /// * `Result<ChatResponse, ProviderError>` - The completion response or an error
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError>;

    /// Test the connection to the provider with a minimal request
    ///
    /// Not used by the translation flow itself - API surface for library
    /// consumers that want a startup probe.
    ///
    /// # Arguments
    /// * `model` - The model to probe with
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the provider answered, or an error
    #[allow(dead_code)]
    async fn test_connection(&self, model: &str) -> Result<(), ProviderError>;
}

/// Chat message object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,
    /// Content of the message
    pub content: String,
}

/// Chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model name to use for the completion
    model: String,
    /// Messages of the conversation
    messages: Vec<ChatMessage>,
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Builder methods for ChatRequest - some are API surface for library consumers
#[allow(dead_code)]
impl ChatRequest {
    /// Create a new chat request for a model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Add a message to the conversation
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum number of tokens to generate
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// The model this request targets
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The messages of the conversation, in order
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

/// One choice in a chat completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseChoice {
    /// The message produced for this choice
    pub message: ResponseMessage,
}

/// Message carried by a response choice
///
/// `content` is optional on the wire; a choice with no content is treated
/// the same as no choice at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMessage {
    /// Role of the message sender
    #[serde(default)]
    pub role: String,
    /// Content of the message, absent for non-text responses
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage information
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of prompt tokens consumed
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Number of completion tokens produced
    #[serde(default)]
    pub completion_tokens: u32,
    /// Total tokens for the request
    #[serde(default)]
    pub total_tokens: u32,
}

/// Chat completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The completion choices, usually exactly one
    #[serde(default)]
    pub choices: Vec<ResponseChoice>,
    /// Token usage for the request, when reported
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

impl ChatResponse {
    /// Content of the first choice, if any choice carries content
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}

// Test double - exercised from the test suites, not the binary
#[allow(dead_code)]
pub mod mock;
pub mod openai;
