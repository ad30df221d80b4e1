use async_trait::async_trait;
use log::{error, warn};
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{ChatRequest, ChatResponse, CompletionProvider};

/// Default request timeout; whole-file translations can run for minutes
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// OpenAI client for OpenAI-compatible chat completion APIs
pub struct OpenAI {
    /// HTTP client for API requests
    client: Client,
    /// API key for bearer authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
    /// Maximum number of retry attempts for transient failures
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

/// OpenAI client implementation - some methods are API surface for library consumers
#[allow(dead_code)]
impl OpenAI {
    /// Create a new OpenAI client with default timeout and retry settings
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::new_with_config(api_key, endpoint, DEFAULT_TIMEOUT_SECS, 3, 1000)
    }

    /// Create a new OpenAI client with explicit timeout and retry settings
    pub fn new_with_config(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            max_retries,
            backoff_base_ms,
        }
    }

    /// URL of the chat completions resource
    fn chat_url(&self) -> String {
        if self.endpoint.is_empty() {
            "https://api.openai.com/v1/chat/completions".to_string()
        } else {
            format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
        }
    }

    /// Send one chat completion request, without retry
    async fn send_once(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        let response = self
            .client
            .post(self.chat_url())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("OpenAI API error ({}): {}", status, error_text);

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    ProviderError::AuthenticationError(error_text)
                }
                StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimitExceeded(error_text),
                _ => ProviderError::ApiError {
                    status_code: status.as_u16(),
                    message: error_text,
                },
            });
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }
}

impl fmt::Debug for OpenAI {
    // api_key stays out of debug output
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAI")
            .field("endpoint", &self.endpoint)
            .field("max_retries", &self.max_retries)
            .field("backoff_base_ms", &self.backoff_base_ms)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CompletionProvider for OpenAI {
    /// Complete a chat request, retrying transient failures with
    /// exponential backoff
    ///
    /// Authentication and other non-transient errors are returned
    /// immediately. With `max_retries` of zero every failure is final.
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        let mut attempt: u32 = 0;

        loop {
            match self.send_once(&request).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    // Cap the exponent so absurd retry counts cannot overflow the shift
                    let backoff_ms = self.backoff_base_ms.saturating_mul(1u64 << attempt.min(16));
                    warn!(
                        "OpenAI API request failed: {} - retrying in {}ms (attempt {}/{})",
                        e,
                        backoff_ms,
                        attempt + 1,
                        self.max_retries
                    );
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Probe the API with a minimal single-shot request
    #[allow(dead_code)]
    async fn test_connection(&self, model: &str) -> Result<(), ProviderError> {
        let request = ChatRequest::new(model)
            .add_message("user", "Hello")
            .max_tokens(10);

        self.send_once(&request).await?;
        Ok(())
    }
}
