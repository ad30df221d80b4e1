/*!
 * Mock provider implementation for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::working()` - Always succeeds with transformed text
 * - `MockProvider::failing()` - Always fails with an API error
 * - `MockProvider::empty_choices()` - Succeeds with no choices at all
 * - `MockProvider::empty_content()` - Succeeds with a blank first choice
 * - `MockProvider::slow(ms)` - Delays before answering (timeout testing)
 *
 * Every request is recorded, so tests can assert on the exact
 * conversation a caller built.
 */

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::{
    ChatRequest, ChatResponse, CompletionProvider, ResponseChoice, ResponseMessage, TokenUsage,
};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a transformed copy of the user message
    Working,
    /// Always fails with an API error
    Failing,
    /// Succeeds but the response carries no choices
    EmptyChoices,
    /// Succeeds but the first choice carries only whitespace
    EmptyContent,
    /// Simulates slow response (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Mock provider for testing pipeline behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Every request this provider has received
    requests: Arc<Mutex<Vec<ChatRequest>>>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&ChatRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            requests: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns a response without any choices
    pub fn empty_choices() -> Self {
        Self::new(MockBehavior::EmptyChoices)
    }

    /// Create a mock whose first choice carries only whitespace
    pub fn empty_content() -> Self {
        Self::new(MockBehavior::EmptyContent)
    }

    /// Create a mock that sleeps before answering
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&ChatRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// All requests received so far, in order
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Build a successful single-choice response around the given content
    pub fn response_with_content(content: &str) -> ChatResponse {
        ChatResponse {
            choices: vec![ResponseChoice {
                message: ResponseMessage {
                    role: "assistant".to_string(),
                    content: Some(content.to_string()),
                },
            }],
            usage: Some(TokenUsage {
                prompt_tokens: 10,
                completion_tokens: content.len() as u32,
                total_tokens: 10 + content.len() as u32,
            }),
        }
    }

    /// Default transform applied by the working mode: the last user turn
    /// tagged as translated
    fn default_response_text(request: &ChatRequest) -> String {
        let user_content = request
            .messages()
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        format!("[TRANSLATED]\n{}", user_content)
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            requests: Arc::clone(&self.requests),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());

        match self.behavior {
            MockBehavior::Working => {
                let text = if let Some(generator) = self.custom_response {
                    generator(&request)
                } else {
                    Self::default_response_text(&request)
                };
                Ok(Self::response_with_content(&text))
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),

            MockBehavior::EmptyChoices => Ok(ChatResponse {
                choices: Vec::new(),
                usage: Some(TokenUsage::default()),
            }),

            MockBehavior::EmptyContent => Ok(ChatResponse {
                choices: vec![ResponseChoice {
                    message: ResponseMessage {
                        role: "assistant".to_string(),
                        content: Some("  \n".to_string()),
                    },
                }],
                usage: Some(TokenUsage::default()),
            }),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(Self::response_with_content("[TRANSLATED] slow response"))
            }
        }
    }

    async fn test_connection(&self, _model: &str) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated connection failure".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
