/*!
 * Prompt templates for whole-file subtitle translation.
 *
 * The system instruction is the entire business logic of this tool, so it is
 * treated as configuration: a named built-in template, or a file-loaded
 * replacement, with language placeholders and an optional work-specific
 * glossary block rendered in at request-build time.
 */

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::path::Path;

use crate::app_config::{GlossaryTerm, PromptConfig};

/// Name of the default built-in template.
pub const SUBTITLE_TRANSLATOR_NAME: &str = "subtitle-translator";

/// Registry of built-in templates by name.
static BUILTIN_TEMPLATES: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([(SUBTITLE_TRANSLATOR_NAME, PromptTemplate::SUBTITLE_TRANSLATOR)])
});

/// Whether a built-in template with this name exists.
pub fn is_builtin_template(name: &str) -> bool {
    BUILTIN_TEMPLATES.contains_key(name)
}

/// Names of all built-in templates.
pub fn builtin_template_names() -> Vec<&'static str> {
    BUILTIN_TEMPLATES.keys().copied().collect()
}

/// System prompt template for subtitle translation.
///
/// Recognized placeholders: `{source_language}`, `{target_language}` (full
/// language names) and `{work_context}` (the optional glossary block; when a
/// template has no such placeholder the block is appended at the end).
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

/// Template constructors and rendering - some are API surface for library consumers
#[allow(dead_code)]
impl PromptTemplate {
    /// The default system prompt for whole-file subtitle translation.
    pub const SUBTITLE_TRANSLATOR: &'static str = r#"You are an excellent translator of TV subtitles. You will translate the following
subtitle file from {source_language} to {target_language}, using the highest possible
standards of quality. The file is in SRT format. You will keep all time codes intact.
You will answer as a complete SRT file, keeping the same format as the input file.
Keep line breaks at the same places. Make sure you match up translated lines correctly.

As a professional translator, you will correctly identify all {source_language} idioms
in the input text, and replace them with corresponding {target_language} idioms,
instead of translating them word by word. For instance, translate "Screw traditions!"
with "Åt helvete med traditioner". If no corresponding {target_language} idiom exists,
you will try to capture the meaning of the phrase in your translation.

Remember that the SRT format can capture multi-line sentences, even if they are
interrupted by time codes. So make sure that if several consecutive lines make sense
as a whole sentence in {source_language}, the corresponding lines must make sense as
a whole sentence in {target_language}, too. Often, but not always, the punctuation
will help you determine this.

Every sentence should be translated as accurately as possible. Try to understand
each sentence in the context of the dialogue surrounding it, and make a sane and
logical translation. If a sentence is ambiguous, provide the most likely translation
based on the context.

{work_context}

Good luck!"#;

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Create the default subtitle translator template.
    pub fn subtitle_translator() -> Self {
        Self::new(Self::SUBTITLE_TRANSLATOR)
    }

    /// Look up a built-in template by name.
    pub fn builtin(name: &str) -> Option<Self> {
        BUILTIN_TEMPLATES.get(name).map(|text| Self::new(text))
    }

    /// Load a template from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let template = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read prompt template file: {:?}", path))?;
        Ok(Self::new(&template))
    }

    /// Resolve the template a configuration asks for.
    ///
    /// A `template_file` replaces the built-in text entirely; otherwise the
    /// named built-in is used.
    pub fn from_config(config: &PromptConfig) -> Result<Self> {
        if let Some(path) = &config.template_file {
            return Self::from_file(path);
        }

        Self::builtin(&config.template).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown prompt template '{}' (available: {})",
                config.template,
                builtin_template_names().join(", ")
            )
        })
    }

    /// Render the template with the given language names and no work context.
    pub fn render(&self, source_language: &str, target_language: &str) -> String {
        self.render_with_context(source_language, target_language, None)
    }

    /// Render the template with the given language names and an optional
    /// work-context block.
    pub fn render_with_context(
        &self,
        source_language: &str,
        target_language: &str,
        work_context: Option<&str>,
    ) -> String {
        let mut rendered = self
            .template
            .replace("{source_language}", source_language)
            .replace("{target_language}", target_language);

        let block = work_context.unwrap_or("");
        if rendered.contains("{work_context}") {
            rendered = rendered.replace("{work_context}", block);
        } else if !block.is_empty() {
            rendered.push_str("\n\n");
            rendered.push_str(block);
        }

        // Collapse the blank gap left behind when there is no work context
        while rendered.contains("\n\n\n") {
            rendered = rendered.replace("\n\n\n", "\n\n");
        }

        rendered.trim().to_string()
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::subtitle_translator()
    }
}

/// Builder for the complete system prompt of one translation run.
#[derive(Debug, Clone)]
pub struct SystemPromptBuilder {
    template: PromptTemplate,
    source_language: String,
    target_language: String,
    work: Option<String>,
    glossary: Vec<GlossaryTerm>,
}

impl SystemPromptBuilder {
    /// Create a new builder from a template and full language names.
    pub fn new(template: PromptTemplate, source_language: &str, target_language: &str) -> Self {
        Self {
            template,
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            work: None,
            glossary: Vec::new(),
        }
    }

    /// Set the source work the subtitles belong to.
    pub fn with_work(mut self, work: &str) -> Self {
        self.work = Some(work.to_string());
        self
    }

    /// Set the fixed proper-noun translations.
    pub fn with_glossary(mut self, glossary: &[GlossaryTerm]) -> Self {
        self.glossary = glossary.to_vec();
        self
    }

    /// Build the system prompt.
    pub fn build(&self) -> String {
        let block = self.work_context_block();
        self.template.render_with_context(
            &self.source_language,
            &self.target_language,
            block.as_deref(),
        )
    }

    /// Build the optional work-context block from the configured work name
    /// and glossary.
    fn work_context_block(&self) -> Option<String> {
        if self.work.is_none() && self.glossary.is_empty() {
            return None;
        }

        let mut block = String::new();

        if let Some(work) = &self.work {
            block.push_str(&format!(
                "The subtitles are from {}. Please use any additional knowledge you have \
                 about this work to provide adequate translations, where the subtitles \
                 alone would be ambiguous.",
                work
            ));
        }

        if !self.glossary.is_empty() {
            if !block.is_empty() {
                block.push(' ');
            }
            let terms = self
                .glossary
                .iter()
                .map(|t| format!("Always translate \"{}\" as \"{}\".", t.term, t.translation))
                .collect::<Vec<_>>()
                .join(" ");
            block.push_str(&terms);
        }

        Some(block)
    }
}

/// Build the system prompt a configuration describes.
///
/// `source_language` and `target_language` are full language names, already
/// expanded from the configured ISO codes.
pub fn system_prompt_from_config(
    config: &PromptConfig,
    source_language: &str,
    target_language: &str,
) -> Result<String> {
    let template = PromptTemplate::from_config(config)?;

    let mut builder = SystemPromptBuilder::new(template, source_language, target_language);
    if let Some(work) = &config.work {
        builder = builder.with_work(work);
    }
    builder = builder.with_glossary(&config.glossary);

    Ok(builder.build())
}
