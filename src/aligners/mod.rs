/*!
 * Alignment sources producing word-level timestamps.
 *
 * The forced-alignment model itself is an external collaborator. This module
 * defines the contract the engine relies on and the ways to reach a model:
 * - `command`: External aligner process printing JSON
 * - `http`: Aligner service reached over HTTP
 * - `json_file`: Precomputed timestamps stored on disk
 * - `mock`: Scripted source for tests
 */

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::PathBuf;

use crate::alignment::{validate_word_timestamps, WordTimestamp};
use crate::app_config::{AlignerConfig, AlignerProvider};
use crate::errors::AlignerError;

pub mod command;
pub mod http;
pub mod json_file;
pub mod mock;

pub use command::CommandAligner;
pub use http::HttpAligner;
pub use json_file::JsonFileAligner;
pub use mock::{MockAligner, MockBehavior};

/// Everything an alignment source needs for one session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentRequest {
    /// Audio file to align against
    pub audio: PathBuf,
    /// Full transcript text
    pub text: String,
    /// Language identifier understood by the aligner
    pub language: String,
}

impl AlignmentRequest {
    pub fn new(audio: impl Into<PathBuf>, text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            audio: audio.into(),
            text: text.into(),
            language: language.into(),
        }
    }
}

/// Common trait for all alignment sources
///
/// An implementation returns the complete, ordered word timestamp sequence
/// for a request, or fails. Partial results are never returned and callers
/// do not retry.
#[async_trait]
pub trait AlignmentSource: Send + Sync + Debug {
    /// Align the request's text against its audio
    async fn align(&self, request: &AlignmentRequest) -> Result<Vec<WordTimestamp>, AlignerError>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

/// Accepted JSON layouts for word timestamp records
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WordRecords {
    /// `[{"text": .., "start_time": .., "end_time": ..}, ...]`
    Bare(Vec<WordTimestamp>),
    /// `{"words": [...]}`
    Wrapped { words: Vec<WordTimestamp> },
    /// A saved result record: `{"raw_data": {"word_timestamps": [...]}}`
    Report { raw_data: RawWordData },
}

#[derive(Debug, Deserialize)]
struct RawWordData {
    word_timestamps: Vec<WordTimestamp>,
}

/// Parse and validate word timestamp records from JSON text
pub fn parse_word_records(json: &str) -> Result<Vec<WordTimestamp>, AlignerError> {
    let records: WordRecords = serde_json::from_str(json.trim()).map_err(|e| {
        AlignerError::ParseError(format!(
            "expected a word timestamp array, {{\"words\": [...]}} or a result record: {}",
            e
        ))
    })?;

    let words = match records {
        WordRecords::Bare(words) => words,
        WordRecords::Wrapped { words } => words,
        WordRecords::Report { raw_data } => raw_data.word_timestamps,
    };

    validate_word_timestamps(&words)?;
    Ok(words)
}

/// Build the alignment source selected in the configuration
pub fn create_source(config: &AlignerConfig) -> Result<Box<dyn AlignmentSource>, AlignerError> {
    let source: Box<dyn AlignmentSource> = match config.provider {
        AlignerProvider::Command => Box::new(CommandAligner::from_config(&config.command)),
        AlignerProvider::Http => Box::new(HttpAligner::from_config(&config.http)?),
        AlignerProvider::JsonFile => Box::new(JsonFileAligner::new(config.json_file.path.clone())),
    };
    debug!("Created {} alignment source", config.provider);
    Ok(source)
}
