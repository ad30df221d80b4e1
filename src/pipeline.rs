/*!
 * Whole-file translation pipeline.
 *
 * One invocation is one linear pass: read the subtitle file, send it as a
 * single chat completion, write the answer back out. The file is never
 * parsed into cues; the completion service sees the exact bytes of the
 * input and the output file gets the exact text of the first choice.
 */

use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::errors::PipelineError;
use crate::providers::{ChatRequest, CompletionProvider, TokenUsage};

/// Result of a completed translation run
#[derive(Debug, Clone)]
pub struct TranslationOutcome {
    /// Where the translation was written
    pub output_path: PathBuf,
    /// Size of the written translation in bytes
    pub bytes_written: usize,
    /// Token usage reported by the provider, when available
    pub usage: Option<TokenUsage>,
}

/// Translation pipeline over a completion provider
///
/// The provider is an explicit dependency so tests can drive the pipeline
/// with a mock instead of a live HTTP client.
#[derive(Debug)]
pub struct TranslationPipeline<P: CompletionProvider> {
    /// Provider used for the completion call
    provider: P,
    /// Model identifier sent with every request
    model: String,
    /// Rendered system prompt for the translation conversation
    system_prompt: String,
    /// Sampling temperature, if configured
    temperature: Option<f32>,
    /// Completion size cap, if configured
    max_tokens: Option<u32>,
}

impl<P: CompletionProvider> TranslationPipeline<P> {
    /// Create a new pipeline around a provider
    pub fn new(provider: P, model: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            system_prompt: system_prompt.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum number of completion tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Translate one subtitle file
    ///
    /// Reads `input` whole, performs a single completion call, and writes
    /// the first choice verbatim to `output`, replacing any existing file.
    /// Nothing is written unless the provider returned usable content.
    pub async fn translate_file(
        &self,
        input: &Path,
        output: &Path,
    ) -> Result<TranslationOutcome, PipelineError> {
        let document = std::fs::read_to_string(input).map_err(|e| PipelineError::Read {
            path: input.to_path_buf(),
            source: e,
        })?;
        debug!(
            "Read {} bytes from {:?}, requesting translation with model {}",
            document.len(),
            input,
            self.model
        );

        let request = self.build_request(&document);
        let response = self.provider.complete(request).await?;

        let content = response
            .first_content()
            .filter(|text| !text.trim().is_empty())
            .ok_or(PipelineError::EmptyResponse)?;

        std::fs::write(output, content).map_err(|e| PipelineError::Write {
            path: output.to_path_buf(),
            source: e,
        })?;

        if let Some(usage) = response.usage {
            debug!(
                "Token usage: {} prompt, {} completion",
                usage.prompt_tokens, usage.completion_tokens
            );
        }
        info!("Translation saved to {:?}", output);

        Ok(TranslationOutcome {
            output_path: output.to_path_buf(),
            bytes_written: content.len(),
            usage: response.usage,
        })
    }

    /// Build the two-turn conversation for one document
    ///
    /// The user turn is the document exactly as read, with no trimming or
    /// re-encoding.
    fn build_request(&self, document: &str) -> ChatRequest {
        let mut request = ChatRequest::new(&self.model)
            .add_message("system", &self.system_prompt)
            .add_message("user", document);

        if let Some(temperature) = self.temperature {
            request = request.temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            request = request.max_tokens(max_tokens);
        }

        request
    }
}
