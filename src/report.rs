/*!
 * Structured result record of an alignment session.
 *
 * The record holds the matched segments, summary statistics and the raw
 * inputs (segment texts and word timestamps) so a session can be inspected
 * or replayed later.
 */

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::alignment::{AlignmentSession, MatchOutcome, MatchedSegment, WordTimestamp};
use crate::app_config::SplitMode;
use crate::file_utils::FileManager;

// @struct: Session summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    // @field: Number of text segments
    pub total_segments: usize,
    // @field: Number of word timestamps
    pub total_words: usize,
    // @field: Number of segments that found a window
    pub matched_segments: usize,
    // @field: Latest word end time in seconds
    pub total_duration: f64,
    pub split_mode: SplitMode,
    // @field: Delimiters used when splitting by punctuation
    pub punctuation_used: Option<String>,
}

impl Statistics {
    /// Matched share of all segments, 0 when there are none
    pub fn match_rate(&self) -> f64 {
        if self.total_segments == 0 {
            0.0
        } else {
            self.matched_segments as f64 / self.total_segments as f64
        }
    }
}

// @struct: Session inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawData {
    pub text_segments: Vec<String>,
    pub word_timestamps: Vec<WordTimestamp>,
}

// @struct: Result record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentReport {
    pub segments: Vec<MatchedSegment>,
    pub statistics: Statistics,
    pub raw_data: RawData,
}

impl AlignmentReport {
    /// Build the record for a session and its matching outcome
    pub fn build(session: &AlignmentSession, outcome: &MatchOutcome, split_mode: SplitMode) -> Self {
        let punctuation_used = match split_mode {
            SplitMode::Punctuation => Some(session.delimiters.as_str().to_string()),
        };

        Self {
            segments: outcome.segments.clone(),
            statistics: Statistics {
                total_segments: session.text_segments.len(),
                total_words: session.word_timestamps.len(),
                matched_segments: outcome.matched_count(),
                total_duration: session.total_duration(),
                split_mode,
                punctuation_used,
            },
            raw_data: RawData {
                text_segments: session.text_segments.iter().map(|s| s.text.clone()).collect(),
                word_timestamps: session.word_timestamps.clone(),
            },
        }
    }

    /// Pretty-printed JSON, non-ASCII text kept as is
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize alignment report")
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json()?;
        FileManager::write_to_file(path, &json)
    }

    /// Read a saved record.
    ///
    /// Segment positions are not stored in the JSON layout; they are rebuilt
    /// from `raw_data` by locating each segment's words and text. Segments
    /// whose words cannot be found keep an empty range.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = FileManager::read_to_string(&path)?;
        let mut report: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse alignment report: {:?}", path.as_ref()))?;
        report.restore_positions();
        Ok(report)
    }

    fn restore_positions(&mut self) {
        let words = &self.raw_data.word_timestamps;
        let texts = &self.raw_data.text_segments;
        let mut word_claimed = vec![false; words.len()];
        let mut text_claimed = vec![false; texts.len()];

        for segment in &mut self.segments {
            let width = segment.words.len();
            if width > 0 && width <= words.len() {
                let found = (0..=words.len() - width).find(|&start| {
                    !word_claimed[start..start + width].iter().any(|&used| used)
                        && words[start..start + width] == segment.words[..]
                });
                if let Some(start) = found {
                    word_claimed[start..start + width].fill(true);
                    segment.word_range = start..start + width;
                }
            }

            let index = (0..texts.len()).find(|&i| !text_claimed[i] && texts[i] == segment.text);
            if let Some(index) = index {
                text_claimed[index] = true;
                segment.segment_index = index;
            }
        }
    }
}
