use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;

use crate::alignment::DEFAULT_PUNCTUATION;

/// Application configuration module
/// This module handles loading, validating and saving the settings of an
/// alignment session: language, segmentation, alignment source and outputs.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language passed to the alignment source (name or ISO code)
    #[serde(default = "default_language")]
    pub language: String,

    /// Text segmentation settings
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Alignment source settings
    #[serde(default)]
    pub aligner: AlignerConfig,

    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// How the transcript is cut into segments
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    // @mode: Cut after every delimiter character
    #[default]
    Punctuation,
}

/// Text segmentation configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SegmentationConfig {
    /// Segmentation strategy
    #[serde(default)]
    pub split_mode: SplitMode,

    /// Delimiter characters; each one ends a segment
    #[serde(default = "default_punctuation")]
    pub punctuation: String,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            split_mode: SplitMode::default(),
            punctuation: default_punctuation(),
        }
    }
}

/// Alignment source type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AlignerProvider {
    // @provider: External aligner program
    Command,
    // @provider: Aligner HTTP service
    #[default]
    Http,
    // @provider: Precomputed timestamps on disk
    JsonFile,
}

impl AlignerProvider {
    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Command => "command".to_string(),
            Self::Http => "http".to_string(),
            Self::JsonFile => "json_file".to_string(),
        }
    }
}

impl std::fmt::Display for AlignerProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

/// External aligner program configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CommandAlignerConfig {
    /// Program to execute
    #[serde(default)]
    pub program: String,

    /// Arguments; `{audio}`, `{text_file}` and `{language}` are substituted
    #[serde(default = "default_command_args")]
    pub args: Vec<String>,

    /// Maximum run time in seconds
    #[serde(default = "default_command_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CommandAlignerConfig {
    fn default() -> Self {
        Self {
            program: String::new(),
            args: default_command_args(),
            timeout_secs: default_command_timeout_secs(),
        }
    }
}

/// Aligner HTTP service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HttpAlignerConfig {
    /// Service base URL
    #[serde(default = "default_http_endpoint")]
    pub endpoint: String,

    /// Model identifier
    #[serde(default = "default_http_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpAlignerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_http_endpoint(),
            model: default_http_model(),
            timeout_secs: default_http_timeout_secs(),
        }
    }
}

/// Precomputed timestamps configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct JsonFileAlignerConfig {
    /// JSON file holding word timestamps
    #[serde(default)]
    pub path: PathBuf,
}

/// Alignment source configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AlignerConfig {
    /// Source to use
    #[serde(default)]
    pub provider: AlignerProvider,

    #[serde(default)]
    pub command: CommandAlignerConfig,

    #[serde(default)]
    pub http: HttpAlignerConfig,

    #[serde(default)]
    pub json_file: JsonFileAlignerConfig,
}

/// Output file configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Directory receiving the outputs; empty means the current directory
    #[serde(default)]
    pub directory: PathBuf,

    /// Suffix of the result record, appended to the media file stem
    #[serde(default = "default_json_suffix")]
    pub json_suffix: String,

    /// Suffix of the word-level subtitles
    #[serde(default = "default_word_srt_suffix")]
    pub word_srt_suffix: String,

    /// Suffix of the sentence-level subtitles
    #[serde(default = "default_sentence_srt_suffix")]
    pub sentence_srt_suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::new(),
            json_suffix: default_json_suffix(),
            word_srt_suffix: default_word_srt_suffix(),
            sentence_srt_suffix: default_sentence_srt_suffix(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_language() -> String {
    "Japanese".to_string()
}

fn default_punctuation() -> String {
    DEFAULT_PUNCTUATION.to_string()
}

fn default_command_args() -> Vec<String> {
    vec![
        "{audio}".to_string(),
        "{text_file}".to_string(),
        "{language}".to_string(),
    ]
}

fn default_command_timeout_secs() -> u64 {
    600
}

fn default_http_endpoint() -> String {
    "http://localhost:8000".to_string()
}

fn default_http_model() -> String {
    "Qwen/Qwen3-ForcedAligner-0.6B".to_string()
}

fn default_http_timeout_secs() -> u64 {
    600
}

fn default_json_suffix() -> String {
    ".json".to_string()
}

fn default_word_srt_suffix() -> String {
    "_word.srt".to_string()
}

fn default_sentence_srt_suffix() -> String {
    "_sentence.srt".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.language.trim().is_empty() {
            return Err(anyhow!("Language must not be empty"));
        }

        match self.aligner.provider {
            AlignerProvider::Command => {
                let command = &self.aligner.command;
                if command.program.trim().is_empty() {
                    return Err(anyhow!("Aligner program is required for the command provider"));
                }
                if command.timeout_secs == 0 {
                    return Err(anyhow!("Aligner command timeout must be greater than zero"));
                }
            }
            AlignerProvider::Http => {
                let http = &self.aligner.http;
                url::Url::parse(&http.endpoint)
                    .map_err(|e| anyhow!("Invalid aligner endpoint '{}': {}", http.endpoint, e))?;
                if http.model.trim().is_empty() {
                    return Err(anyhow!("Aligner model is required for the http provider"));
                }
                if http.timeout_secs == 0 {
                    return Err(anyhow!("Aligner request timeout must be greater than zero"));
                }
            }
            AlignerProvider::JsonFile => {
                if self.aligner.json_file.path.as_os_str().is_empty() {
                    return Err(anyhow!("Word timestamp file path is required for the json_file provider"));
                }
            }
        }

        let output = &self.output;
        for (name, suffix) in [
            ("json_suffix", &output.json_suffix),
            ("word_srt_suffix", &output.word_srt_suffix),
            ("sentence_srt_suffix", &output.sentence_srt_suffix),
        ] {
            if suffix.is_empty() {
                return Err(anyhow!("Output {} must not be empty", name));
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            language: default_language(),
            segmentation: SegmentationConfig::default(),
            aligner: AlignerConfig::default(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
