/*!
 * Tests for application configuration loading, defaults and validation
 */

use std::path::PathBuf;

use srt_translate::app_config::{Config, GlossaryTerm, LogLevel, API_KEY_ENV};

use crate::common;

/// Test that the default configuration carries the documented values
#[test]
fn test_defaultConfig_shouldHaveExpectedValues() {
    let config = Config::default();

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "sv");

    assert_eq!(config.translation.model, "gpt-4o-2024-08-06");
    assert_eq!(config.translation.endpoint, "https://api.openai.com/v1");
    assert!(config.translation.api_key.is_empty());
    assert_eq!(config.translation.temperature, 0.3);
    assert_eq!(config.translation.max_tokens, None);
    assert_eq!(config.translation.timeout_secs, 300);
    assert_eq!(config.translation.retry_count, 3);
    assert_eq!(config.translation.retry_backoff_ms, 1000);

    assert_eq!(config.prompt.template, "subtitle-translator");
    assert!(config.prompt.template_file.is_none());
    assert!(config.prompt.work.is_none());
    assert!(config.prompt.glossary.is_empty());

    assert_eq!(config.files.default_input, "input.srt");
    assert_eq!(config.files.default_output, "output.srt");
    assert_eq!(config.files.output_suffix, ".out");

    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test that a minimal configuration file fills in every default
#[test]
fn test_parseConfig_withMinimalJson_shouldFillDefaults() {
    let json = r#"{ "source_language": "de", "target_language": "en" }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.source_language, "de");
    assert_eq!(config.target_language, "en");
    assert_eq!(config.translation.model, "gpt-4o-2024-08-06");
    assert_eq!(config.translation.temperature, 0.3);
    assert_eq!(config.files.default_input, "input.srt");
    assert_eq!(config.prompt.template, "subtitle-translator");
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test that serializing and parsing back preserves customized values
#[test]
fn test_configRoundTrip_shouldPreserveValues() {
    let mut config = common::test_config();
    config.source_language = "ja".to_string();
    config.target_language = "fr".to_string();
    config.translation.model = "gpt-4o-mini".to_string();
    config.translation.max_tokens = Some(4096);
    config.translation.retry_count = 1;
    config.prompt.work = Some("Spirited Away".to_string());
    config.prompt.glossary = vec![GlossaryTerm {
        term: "Kamikakushi".to_string(),
        translation: "l'enlèvement par les esprits".to_string(),
    }];
    config.files.output_suffix = ".translated".to_string();
    config.log_level = LogLevel::Debug;

    let json = serde_json::to_string_pretty(&config).unwrap();
    let parsed: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.source_language, "ja");
    assert_eq!(parsed.target_language, "fr");
    assert_eq!(parsed.translation.model, "gpt-4o-mini");
    assert_eq!(parsed.translation.max_tokens, Some(4096));
    assert_eq!(parsed.translation.retry_count, 1);
    assert_eq!(parsed.prompt.work.as_deref(), Some("Spirited Away"));
    assert_eq!(parsed.prompt.glossary, config.prompt.glossary);
    assert_eq!(parsed.files.output_suffix, ".translated");
    assert_eq!(parsed.log_level, LogLevel::Debug);
}

/// Test that the log level uses lowercase names on the wire
#[test]
fn test_logLevel_serde_shouldUseLowercaseNames() {
    assert_eq!(serde_json::to_string(&LogLevel::Debug).unwrap(), "\"debug\"");
    assert_eq!(
        serde_json::from_str::<LogLevel>("\"warn\"").unwrap(),
        LogLevel::Warn
    );
}

/// Test that a configuration with an API key validates cleanly
#[test]
fn test_validation_withApiKey_shouldPass() {
    let config = common::test_config();
    assert!(config.validate().is_ok());
}

/// Test that an unknown source language fails validation
#[test]
fn test_validation_withInvalidSourceLanguage_shouldFail() {
    let mut config = common::test_config();
    config.source_language = "xx".to_string();

    let error = config.validate().unwrap_err();
    assert!(error.to_string().contains("Invalid language code"));
}

/// Test that an unknown target language fails validation
#[test]
fn test_validation_withInvalidTargetLanguage_shouldFail() {
    let mut config = common::test_config();
    config.target_language = "xyz".to_string();

    let error = config.validate().unwrap_err();
    assert!(error.to_string().contains("Invalid language code"));
}

/// Test that a malformed endpoint URL fails validation
#[test]
fn test_validation_withInvalidEndpoint_shouldFail() {
    let mut config = common::test_config();
    config.translation.endpoint = "not a url".to_string();

    let error = config.validate().unwrap_err();
    assert!(error.to_string().contains("Invalid endpoint URL"));
}

/// Test that an out-of-range temperature fails validation
#[test]
fn test_validation_withTemperatureOutOfRange_shouldFail() {
    let mut config = common::test_config();
    config.translation.temperature = 2.5;

    let error = config.validate().unwrap_err();
    assert!(error.to_string().contains("Temperature"));
}

/// Test that an unknown built-in template name fails validation
#[test]
fn test_validation_withUnknownTemplate_shouldFail() {
    let mut config = common::test_config();
    config.prompt.template = "nonexistent".to_string();

    let error = config.validate().unwrap_err();
    assert!(error.to_string().contains("Unknown prompt template"));
}

/// Test that a template file bypasses the built-in name check
#[test]
fn test_validation_withTemplateFile_shouldIgnoreTemplateName() {
    let mut config = common::test_config();
    config.prompt.template = "nonexistent".to_string();
    config.prompt.template_file = Some(PathBuf::from("custom-prompt.txt"));

    assert!(config.validate().is_ok());
}

/// Test that a missing credential is rejected before any request goes out
#[test]
fn test_validation_withoutApiKey_shouldFail() {
    // This test only makes sense when the environment carries no key
    let env_key = std::env::var(API_KEY_ENV).unwrap_or_default();
    if !env_key.is_empty() {
        return;
    }

    let config = Config::default();
    let error = config.validate().unwrap_err();
    assert!(error.to_string().contains("Authentication not configured"));
    assert!(error.to_string().contains(API_KEY_ENV));
}

/// Test that the config file key is used when the environment has none
#[test]
fn test_resolveApiKey_withConfigValue_shouldUseFallback() {
    // The environment takes precedence, so skip when a real key is set
    let env_key = std::env::var(API_KEY_ENV).unwrap_or_default();
    if !env_key.is_empty() {
        return;
    }

    let mut config = Config::default();
    config.translation.api_key = "sk-from-config".to_string();

    assert_eq!(config.translation.resolve_api_key(), "sk-from-config");
}

/// Test loading a configuration from a JSON file
#[test]
fn test_fromFile_withValidJson_shouldLoad() {
    let temp_dir = common::create_temp_dir().unwrap();
    let json = r#"{
        "source_language": "en",
        "target_language": "de",
        "translation": { "model": "gpt-4o-mini", "temperature": 0.5 }
    }"#;
    let config_path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "conf.json",
        json,
    )
    .unwrap();

    let config = Config::from_file(&config_path).unwrap();
    assert_eq!(config.target_language, "de");
    assert_eq!(config.translation.model, "gpt-4o-mini");
    assert_eq!(config.translation.temperature, 0.5);
    // Unspecified fields fall back to defaults
    assert_eq!(config.translation.timeout_secs, 300);
}

/// Test that malformed JSON is reported as a parse failure
#[test]
fn test_fromFile_withInvalidJson_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let config_path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "conf.json",
        "this is not json",
    )
    .unwrap();

    let error = Config::from_file(&config_path).unwrap_err();
    assert!(error.to_string().contains("Failed to parse config file"));
}

/// Test that saving and reloading preserves the configuration
#[test]
fn test_saveAndLoad_shouldRoundTrip() {
    let temp_dir = common::create_temp_dir().unwrap();
    let config_path = temp_dir.path().join("conf.json");

    let mut config = common::test_config();
    config.target_language = "no".to_string();
    config.translation.max_tokens = Some(8192);
    config.save(&config_path).unwrap();

    let loaded = Config::from_file(&config_path).unwrap();
    assert_eq!(loaded.target_language, "no");
    assert_eq!(loaded.translation.max_tokens, Some(8192));
    assert_eq!(loaded.translation.api_key, "sk-test-key");
}

/// Test that a missing config file is created with defaults
#[test]
fn test_loadOrCreate_withMissingFile_shouldCreateDefault() {
    let temp_dir = common::create_temp_dir().unwrap();
    let config_path = temp_dir.path().join("conf.json");
    assert!(!config_path.exists());

    let config = Config::load_or_create(&config_path).unwrap();

    assert!(config_path.exists());
    assert_eq!(config.source_language, "en");
    assert_eq!(config.translation.model, "gpt-4o-2024-08-06");

    // The written file parses back to the same defaults
    let reloaded = Config::from_file(&config_path).unwrap();
    assert_eq!(reloaded.target_language, "sv");
}

/// Test that an existing config file is loaded, not replaced
#[test]
fn test_loadOrCreate_withExistingFile_shouldLoadIt() {
    let temp_dir = common::create_temp_dir().unwrap();
    let config_path = temp_dir.path().join("conf.json");

    let mut config = common::test_config();
    config.translation.model = "custom-model".to_string();
    config.save(&config_path).unwrap();

    let loaded = Config::load_or_create(&config_path).unwrap();
    assert_eq!(loaded.translation.model, "custom-model");
}
