/*!
 * Tests for file operations and input/output path resolution
 */

use std::path::{Path, PathBuf};

use srt_translate::app_config::FilesConfig;
use srt_translate::file_utils::FileManager;

use crate::common;

/// Test file existence checks
#[test]
fn test_fileExists_withExistingFile_shouldReturnTrue() {
    let temp_dir = common::create_temp_dir().unwrap();
    let file_path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "exists.txt",
        "content",
    )
    .unwrap();

    assert!(FileManager::file_exists(&file_path));
    assert!(!FileManager::file_exists(temp_dir.path().join("missing.txt")));
    // A directory is not a file
    assert!(!FileManager::file_exists(temp_dir.path()));
}

/// Test reading a file to a string
#[test]
fn test_readToString_withExistingFile_shouldReturnContent() {
    let temp_dir = common::create_temp_dir().unwrap();
    let file_path = common::create_test_subtitle(&temp_dir.path().to_path_buf(), "input.srt")
        .unwrap();

    let content = FileManager::read_to_string(&file_path).unwrap();
    assert_eq!(content, common::SAMPLE_SUBTITLE);
}

/// Test that reading a missing file reports the path
#[test]
fn test_readToString_withMissingFile_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let missing = temp_dir.path().join("missing.srt");

    let error = FileManager::read_to_string(&missing).unwrap_err();
    assert!(error.to_string().contains("Failed to read file"));
}

/// Test that writing creates missing parent directories
#[test]
fn test_writeToFile_withNestedPath_shouldCreateParents() {
    let temp_dir = common::create_temp_dir().unwrap();
    let nested = temp_dir.path().join("a").join("b").join("out.srt");

    FileManager::write_to_file(&nested, "subtitle content").unwrap();

    assert!(nested.exists());
    let content = std::fs::read_to_string(&nested).unwrap();
    assert_eq!(content, "subtitle content");
}

/// Test that writing replaces existing content
#[test]
fn test_writeToFile_withExistingFile_shouldOverwrite() {
    let temp_dir = common::create_temp_dir().unwrap();
    let file_path = temp_dir.path().join("out.srt");

    FileManager::write_to_file(&file_path, "first version").unwrap();
    FileManager::write_to_file(&file_path, "second").unwrap();

    let content = std::fs::read_to_string(&file_path).unwrap();
    assert_eq!(content, "second");
}

/// Test directory creation
#[test]
fn test_ensureDir_shouldCreateNestedDirectories() {
    let temp_dir = common::create_temp_dir().unwrap();
    let nested = temp_dir.path().join("x").join("y");

    FileManager::ensure_dir(&nested).unwrap();
    assert!(nested.is_dir());

    // Idempotent for an existing directory
    FileManager::ensure_dir(&nested).unwrap();
}

/// Test deriving an output path by appending a suffix
#[test]
fn test_deriveOutputPath_shouldAppendSuffix() {
    assert_eq!(
        FileManager::derive_output_path("movie.srt", ".out"),
        PathBuf::from("movie.srt.out")
    );
    assert_eq!(
        FileManager::derive_output_path("season1/episode2.srt", ".out"),
        PathBuf::from("season1/episode2.srt.out")
    );
    // The suffix goes after the whole name, extension or not
    assert_eq!(
        FileManager::derive_output_path("subtitles", ".out"),
        PathBuf::from("subtitles.out")
    );
}

/// Test path resolution with no arguments at all
#[test]
fn test_resolveIoPaths_withNoArguments_shouldUseDefaults() {
    let files = FilesConfig::default();

    let (input, output) = FileManager::resolve_io_paths(None, None, &files);

    assert_eq!(input, PathBuf::from("input.srt"));
    assert_eq!(output, PathBuf::from("output.srt"));
}

/// Test path resolution with only an input argument
#[test]
fn test_resolveIoPaths_withInputArgument_shouldDeriveOutput() {
    let files = FilesConfig::default();

    let (input, output) =
        FileManager::resolve_io_paths(Some(Path::new("episode.srt")), None, &files);

    assert_eq!(input, PathBuf::from("episode.srt"));
    assert_eq!(output, PathBuf::from("episode.srt.out"));
}

/// Test that a configured suffix is honored when deriving the output
#[test]
fn test_resolveIoPaths_withCustomSuffix_shouldUseIt() {
    let files = FilesConfig {
        output_suffix: ".sv.srt".to_string(),
        ..FilesConfig::default()
    };

    let (_, output) =
        FileManager::resolve_io_paths(Some(Path::new("episode.srt")), None, &files);

    assert_eq!(output, PathBuf::from("episode.srt.sv.srt"));
}

/// Test that an explicit output argument always wins
#[test]
fn test_resolveIoPaths_withExplicitOutput_shouldUseIt() {
    let files = FilesConfig::default();

    let (input, output) = FileManager::resolve_io_paths(
        Some(Path::new("episode.srt")),
        Some(Path::new("translated.srt")),
        &files,
    );

    assert_eq!(input, PathBuf::from("episode.srt"));
    assert_eq!(output, PathBuf::from("translated.srt"));
}

/// Test that an output argument combines with the default input
#[test]
fn test_resolveIoPaths_withOutputOnly_shouldUseDefaultInput() {
    let files = FilesConfig::default();

    let (input, output) =
        FileManager::resolve_io_paths(None, Some(Path::new("translated.srt")), &files);

    assert_eq!(input, PathBuf::from("input.srt"));
    assert_eq!(output, PathBuf::from("translated.srt"));
}
