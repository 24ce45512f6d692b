use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

// @module: Transcript input resolution

/// Where the transcript comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInput {
    // @variant: Transcript given directly
    InlineText(String),
    // @variant: Path to a UTF-8 transcript file
    FileReference(PathBuf),
}

impl TextInput {
    /// An argument naming an existing file is a file reference, anything else is text
    pub fn detect(arg: &str) -> Self {
        let candidate = Path::new(arg);
        if !arg.is_empty() && candidate.is_file() {
            Self::FileReference(candidate.to_path_buf())
        } else {
            Self::InlineText(arg.to_string())
        }
    }

    /// Return the transcript text
    pub fn resolve(&self) -> Result<String> {
        match self {
            Self::InlineText(text) => Ok(text.clone()),
            Self::FileReference(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read transcript file: {:?}", path)),
        }
    }
}
