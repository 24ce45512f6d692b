use super::matcher::{MatchOutcome, Matcher};
use super::segmenter::{DelimiterSet, TextSegment};
use super::words::WordTimestamp;
use crate::errors::MatchError;

/// Inputs of one processing session.
///
/// Owns the segment and timestamp sequences. Every step reads it and returns
/// new data; nothing is accumulated on the session itself.
#[derive(Debug, Clone)]
pub struct AlignmentSession {
    pub delimiters: DelimiterSet,
    pub text_segments: Vec<TextSegment>,
    pub word_timestamps: Vec<WordTimestamp>,
}

impl AlignmentSession {
    /// Segment `text` and pair it with the aligner output
    pub fn from_text(text: &str, delimiters: DelimiterSet, word_timestamps: Vec<WordTimestamp>) -> Self {
        let text_segments = delimiters.split(text);
        Self {
            delimiters,
            text_segments,
            word_timestamps,
        }
    }

    pub fn new(
        delimiters: DelimiterSet,
        text_segments: Vec<TextSegment>,
        word_timestamps: Vec<WordTimestamp>,
    ) -> Self {
        Self {
            delimiters,
            text_segments,
            word_timestamps,
        }
    }

    /// Run the matcher over this session's inputs
    pub fn match_segments(&self) -> Result<MatchOutcome, MatchError> {
        Matcher::new(self.delimiters.clone()).match_segments(&self.text_segments, &self.word_timestamps)
    }

    /// Latest end time across all word timestamps, 0 when there are none
    pub fn total_duration(&self) -> f64 {
        self.word_timestamps
            .iter()
            .map(|w| w.end_time)
            .reduce(f64::max)
            .unwrap_or(0.0)
    }
}
