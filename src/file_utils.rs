use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_config::FilesConfig;

// @module: File and path utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file, replacing any existing content
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    // @generates: Output path for a given input path
    // @params: input, suffix appended to the full path (e.g. "foo.srt" + ".out" -> "foo.srt.out")
    pub fn derive_output_path<P: AsRef<Path>>(input: P, suffix: &str) -> PathBuf {
        let mut derived = input.as_ref().as_os_str().to_os_string();
        derived.push(suffix);
        PathBuf::from(derived)
    }

    /// Resolve the input/output path pair for one invocation.
    ///
    /// With no input argument the configured default pair is used
    /// (`input.srt` -> `output.srt` out of the box). With an input argument
    /// the output is derived from it by appending the configured suffix.
    /// An explicit output argument always wins.
    pub fn resolve_io_paths(
        input_arg: Option<&Path>,
        output_arg: Option<&Path>,
        files: &FilesConfig,
    ) -> (PathBuf, PathBuf) {
        let (input, derived_output) = match input_arg {
            Some(input) => {
                let output = Self::derive_output_path(input, &files.output_suffix);
                (input.to_path_buf(), output)
            },
            None => (
                PathBuf::from(&files.default_input),
                PathBuf::from(&files.default_output),
            ),
        };

        let output = output_arg
            .map(|p| p.to_path_buf())
            .unwrap_or(derived_output);

        (input, output)
    }
}
