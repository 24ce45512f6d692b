use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::AlignerError;

/// One aligned token as produced by an alignment source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTimestamp {
    /// Surface text of the token
    pub text: String,

    /// Start time in seconds
    pub start_time: f64,

    /// End time in seconds
    pub end_time: f64,
}

impl WordTimestamp {
    pub fn new(text: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Self {
            text: text.into(),
            start_time,
            end_time,
        }
    }

    // @creates: Validated word timestamp
    // @validates: Finite times, non-negative start, end not before start
    pub fn new_validated(
        text: impl Into<String>,
        start_time: f64,
        end_time: f64,
    ) -> Result<Self, AlignerError> {
        let word = Self::new(text, start_time, end_time);
        word.validate()?;
        Ok(word)
    }

    pub fn validate(&self) -> Result<(), AlignerError> {
        if !self.start_time.is_finite() || !self.end_time.is_finite() {
            return Err(AlignerError::InvalidRecord(format!(
                "non-finite time for {:?}: {} -> {}",
                self.text, self.start_time, self.end_time
            )));
        }

        if self.start_time < 0.0 {
            return Err(AlignerError::InvalidRecord(format!(
                "negative start time for {:?}: {}",
                self.text, self.start_time
            )));
        }

        if self.end_time < self.start_time {
            return Err(AlignerError::InvalidRecord(format!(
                "end time {} before start time {} for {:?}",
                self.end_time, self.start_time, self.text
            )));
        }

        Ok(())
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// Validate every record of a timestamp sequence.
///
/// Start times going backwards are only reported; the sequence order is kept.
pub fn validate_word_timestamps(words: &[WordTimestamp]) -> Result<(), AlignerError> {
    for (index, word) in words.iter().enumerate() {
        word.validate()
            .map_err(|e| AlignerError::InvalidRecord(format!("record {}: {}", index, e)))?;
    }

    let regressions = words
        .windows(2)
        .filter(|pair| pair[1].start_time < pair[0].start_time)
        .count();

    if regressions > 0 {
        warn!(
            "Word timestamps are not monotonic: {} start time regression(s) in {} records",
            regressions,
            words.len()
        );
    }

    Ok(())
}
