/*!
 * Transcript-to-timestamp alignment engine.
 *
 * This module turns a transcript and a sequence of word-level timestamps
 * into time-coded sentence segments:
 * - `segmenter`: Delimiter-based splitting and key normalization
 * - `words`: Word timestamp records and their validation
 * - `ledger`: Tracking of consumed word timestamp indices
 * - `scoring`: Similarity between a segment and a candidate window
 * - `matcher`: Greedy segment-to-window matching
 * - `session`: Inputs of one processing session
 */

pub mod ledger;
pub mod matcher;
pub mod scoring;
pub mod segmenter;
pub mod session;
pub mod words;

pub use ledger::ConsumptionLedger;
pub use matcher::{
    match_segments, MatchOutcome, MatchedSegment, Matcher, SegmentType, WindowMatch,
    ACCEPTANCE_THRESHOLD, HIGH_QUALITY_THRESHOLD, MAX_WINDOW_WORDS,
};
pub use scoring::match_score;
pub use segmenter::{split, DelimiterSet, TextSegment, DEFAULT_PUNCTUATION};
pub use session::AlignmentSession;
pub use words::{validate_word_timestamps, WordTimestamp};
