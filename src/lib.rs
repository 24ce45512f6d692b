/*!
 * # textsync - transcript-to-audio subtitle alignment
 *
 * A Rust library that turns a plain transcript and its recording into
 * time-coded subtitles.
 *
 * ## Features
 *
 * - Split transcripts into sentence segments at configurable punctuation
 * - Obtain word-level timestamps from a forced aligner:
 *   - external aligner program
 *   - aligner HTTP service
 *   - precomputed timestamp files
 * - Match every segment to its best window of words without reusing words
 * - Export word-level and sentence-level SRT files and a JSON result record
 * - Extract the audio track of video inputs with ffmpeg
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `alignment`: Segmentation and the matching engine
 * - `aligners`: Alignment source contract and its implementations
 * - `subtitle_exporter`: SRT cue rendering and time formatting
 * - `report`: JSON result record
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `text_input`, `media`, `file_utils`, `language_utils`: Input helpers
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod aligners;
pub mod alignment;
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod media;
pub mod report;
pub mod subtitle_exporter;
pub mod text_input;

// Re-export main types for easier usage
pub use aligners::{AlignmentRequest, AlignmentSource};
pub use alignment::{AlignmentSession, DelimiterSet, MatchedSegment, Matcher, TextSegment, WordTimestamp};
pub use app_config::Config;
pub use app_controller::{Controller, MediaInput, ProcessOutcome, ProcessRequest};
pub use errors::{AlignerError, AppError, MatchError};
pub use report::AlignmentReport;
pub use subtitle_exporter::{SubtitleCue, SubtitleTrack};
pub use text_input::TextInput;
