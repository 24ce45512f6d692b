use async_trait::async_trait;
use log::info;
use std::path::{Path, PathBuf};

use super::{parse_word_records, AlignmentRequest, AlignmentSource};
use crate::alignment::WordTimestamp;
use crate::errors::AlignerError;

/// Alignment source replaying timestamps saved on disk.
///
/// The request's audio and language are ignored.
#[derive(Debug, Clone)]
pub struct JsonFileAligner {
    path: PathBuf,
}

impl JsonFileAligner {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AlignmentSource for JsonFileAligner {
    async fn align(&self, _request: &AlignmentRequest) -> Result<Vec<WordTimestamp>, AlignerError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let words = parse_word_records(&content)?;
        info!("Loaded {} word timestamp(s) from {}", words.len(), self.path.display());
        Ok(words)
    }

    fn name(&self) -> &str {
        "json_file"
    }
}
