/*!
 * Greedy matching of text segments to spans of word timestamps.
 *
 * Each segment, in transcript order, claims the best scoring contiguous
 * window of still unconsumed words. Windows are capped at
 * `MAX_WINDOW_WORDS` words and a window is only accepted when its score
 * exceeds `ACCEPTANCE_THRESHOLD`. Segments without such a window are dropped.
 * Punctuation-only words trailing an accepted window are absorbed into it, one
 * per delimiter ending the segment text, so a sentence cue ends where its
 * final punctuation token ends.
 */

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::ledger::ConsumptionLedger;
use super::scoring::match_score;
use super::segmenter::{DelimiterSet, TextSegment};
use super::words::WordTimestamp;
use crate::errors::MatchError;

/// Maximum number of words a single segment may span
pub const MAX_WINDOW_WORDS: usize = 30;

/// A window must score strictly above this to be accepted
pub const ACCEPTANCE_THRESHOLD: f64 = 0.4;

/// Matches scoring above this are reported as high quality
pub const HIGH_QUALITY_THRESHOLD: f64 = 0.8;

/// Kind of matched unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentType {
    #[default]
    Sentence,
}

/// A text segment with the time span of the words it consumed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedSegment {
    /// Source segment text
    pub text: String,

    /// Start time of the first consumed word
    pub start_time: f64,

    /// End time of the last consumed word
    pub end_time: f64,

    /// The consumed words, in sequence order
    pub words: Vec<WordTimestamp>,

    /// Similarity score in (0.4, 1.0]
    pub match_score: f64,

    pub segment_type: SegmentType,

    /// Index of the source segment in the transcript; not serialized
    #[serde(skip)]
    pub segment_index: usize,

    /// Consumed word timestamp indices
    #[serde(skip)]
    pub word_range: Range<usize>,
}

impl MatchedSegment {
    pub fn is_high_quality(&self) -> bool {
        self.match_score > HIGH_QUALITY_THRESHOLD
    }
}

/// Best window found for one segment
#[derive(Debug, Clone, PartialEq)]
pub struct WindowMatch {
    pub range: Range<usize>,
    pub score: f64,
}

/// Result of one matching pass
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    /// Matched segments sorted by start time
    pub segments: Vec<MatchedSegment>,

    /// Ledger after every accepted match
    pub ledger: ConsumptionLedger,

    /// Indices of segments that found no acceptable window
    pub dropped: Vec<usize>,
}

impl MatchOutcome {
    pub fn matched_count(&self) -> usize {
        self.segments.len()
    }

    pub fn high_quality_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_high_quality()).count()
    }

    pub fn consumed_word_count(&self) -> usize {
        self.ledger.consumed_count()
    }
}

/// Segment-to-word matcher
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    delimiters: DelimiterSet,
}

impl Matcher {
    /// Create a matcher normalizing text with the given delimiter set
    pub fn new(delimiters: DelimiterSet) -> Self {
        Self { delimiters }
    }

    pub fn delimiters(&self) -> &DelimiterSet {
        &self.delimiters
    }

    /// Match every segment against a fresh ledger
    pub fn match_segments(
        &self,
        segments: &[TextSegment],
        words: &[WordTimestamp],
    ) -> Result<MatchOutcome, MatchError> {
        self.match_with_ledger(segments, words, ConsumptionLedger::new(words.len()))
    }

    /// Match every segment, starting from an existing ledger.
    ///
    /// Indices already consumed in `ledger` are never offered to any segment.
    pub fn match_with_ledger(
        &self,
        segments: &[TextSegment],
        words: &[WordTimestamp],
        mut ledger: ConsumptionLedger,
    ) -> Result<MatchOutcome, MatchError> {
        if segments.is_empty() || words.is_empty() {
            return Err(MatchError::InsufficientInput {
                text_segments: segments.len(),
                word_timestamps: words.len(),
            });
        }

        if ledger.len() != words.len() {
            return Err(MatchError::LedgerSizeMismatch {
                ledger: ledger.len(),
                word_timestamps: words.len(),
            });
        }

        info!(
            "Matching {} text segment(s) against {} word timestamp(s)",
            segments.len(),
            words.len()
        );

        let mut matched = Vec::with_capacity(segments.len());
        let mut dropped = Vec::new();

        for segment in segments {
            let target = self.delimiters.normalize(&segment.text);
            let trailing = self.delimiters.trailing_count(&segment.text);

            let Some(best) = self.find_best_window(&target, trailing, words, &ledger) else {
                debug!("No window above threshold for segment {}: {:?}", segment.index, segment.text);
                dropped.push(segment.index);
                continue;
            };

            // find_best_window only offers free ranges
            if !ledger.consume(best.range.clone()) {
                dropped.push(segment.index);
                continue;
            }

            let window = &words[best.range.clone()];
            let (Some(first), Some(last)) = (window.first(), window.last()) else {
                dropped.push(segment.index);
                continue;
            };

            matched.push(MatchedSegment {
                text: segment.text.clone(),
                start_time: first.start_time,
                end_time: last.end_time,
                words: window.to_vec(),
                match_score: best.score,
                segment_type: SegmentType::Sentence,
                segment_index: segment.index,
                word_range: best.range,
            });
        }

        // stable: equal start times keep insertion order
        matched.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

        let outcome = MatchOutcome {
            segments: matched,
            ledger,
            dropped,
        };

        info!("Matched {}/{} segment(s)", outcome.matched_count(), segments.len());
        info!(
            "High quality matches: {}/{}",
            outcome.high_quality_count(),
            outcome.matched_count()
        );

        Ok(outcome)
    }

    /// Best scoring free window for a normalized target key.
    ///
    /// Scans every unconsumed start index and every width up to
    /// `MAX_WINDOW_WORDS`. Only strictly better scores replace the current
    /// best, so ties keep the earliest window. Widening the best window by
    /// words whose text normalizes to nothing keeps the same key and score;
    /// up to `trailing` such words are absorbed into it.
    pub fn find_best_window(
        &self,
        target: &str,
        trailing: usize,
        words: &[WordTimestamp],
        ledger: &ConsumptionLedger,
    ) -> Option<WindowMatch> {
        let mut best: Option<WindowMatch> = None;
        let mut best_score = 0.0;
        let mut absorbed = 0;

        for start in 0..words.len() {
            if ledger.is_consumed(start) {
                continue;
            }

            let limit = (start + MAX_WINDOW_WORDS).min(words.len());
            let mut raw = String::new();
            let mut previous_key: Option<String> = None;

            for end in (start + 1)..=limit {
                // every wider window from this start would overlap too
                if ledger.is_consumed(end - 1) {
                    break;
                }

                raw.push_str(&words[end - 1].text);
                let candidate = self.delimiters.normalize(&raw);

                // A trailing word that normalizes away (punctuation only)
                // belongs to the window that was just accepted, while the
                // segment still has unclaimed final delimiters.
                if previous_key.as_deref() == Some(candidate.as_str()) {
                    if let Some(current) = best.as_mut() {
                        if current.range == (start..end - 1) && absorbed < trailing {
                            current.range.end = end;
                            absorbed += 1;
                        }
                    }
                    continue;
                }

                let score = match_score(target, &candidate);

                if score > best_score && score > ACCEPTANCE_THRESHOLD {
                    best_score = score;
                    absorbed = 0;
                    best = Some(WindowMatch {
                        range: start..end,
                        score,
                    });
                }

                previous_key = Some(candidate);
            }
        }

        best
    }
}

/// Match `segments` to `words`, normalizing with `delimiters`
pub fn match_segments(
    segments: &[TextSegment],
    words: &[WordTimestamp],
    delimiters: &DelimiterSet,
) -> Result<MatchOutcome, MatchError> {
    Matcher::new(delimiters.clone()).match_segments(segments, words)
}
