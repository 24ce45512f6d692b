use anyhow::{Context, Result};
use log::debug;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::alignment::{MatchedSegment, WordTimestamp};

// @module: Subtitle cue rendering and SRT export

// @const: Relative slack, in machine epsilons, absorbing float error before truncation
const FLOAT_SLACK_EPSILONS: f64 = 4.0;

// @struct: Single subtitle cue
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleCue {
    // @field: Cue number
    pub seq_num: usize,

    // @field: Start time in seconds
    pub start_time: f64,

    // @field: End time in seconds
    pub end_time: f64,

    // @field: Cue text
    pub text: String,
}

impl SubtitleCue {
    pub fn new(seq_num: usize, start_time: f64, end_time: f64, text: impl Into<String>) -> Self {
        SubtitleCue {
            seq_num,
            start_time,
            end_time,
            text: text.into(),
        }
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        format_timestamp(self.start_time)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        format_timestamp(self.end_time)
    }
}

impl fmt::Display for SubtitleCue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Format a time in seconds as SRT `HH:MM:SS,mmm`.
///
/// Hours, minutes and seconds come from successive division by 3600 and 60;
/// milliseconds are truncated, never rounded. Out of range input is not
/// clamped.
pub fn format_timestamp(seconds: f64) -> String {
    let exact_ms = seconds * 1000.0;
    // only values within representation error of the next millisecond move
    let slack = exact_ms.abs() * f64::EPSILON * FLOAT_SLACK_EPSILONS;
    let total_ms = (exact_ms + exact_ms.signum() * slack).trunc();

    let hours = (total_ms / 3_600_000.0).floor();
    let remainder = total_ms - hours * 3_600_000.0;
    let minutes = (remainder / 60_000.0).floor();
    let remainder = remainder - minutes * 60_000.0;
    let secs = (remainder / 1_000.0).floor();
    let millis = remainder - secs * 1_000.0;

    format!(
        "{:02}:{:02}:{:02},{:03}",
        hours as i64, minutes as i64, secs as i64, millis as i64
    )
}

/// Ordered list of cues forming one subtitle file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtitleTrack {
    /// List of subtitle cues
    pub entries: Vec<SubtitleCue>,
}

impl SubtitleTrack {
    pub fn new(entries: Vec<SubtitleCue>) -> Self {
        SubtitleTrack { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the whole track in SRT format
    pub fn to_srt_string(&self) -> String {
        self.entries.iter().map(|entry| entry.to_string()).collect()
    }

    /// Write the track to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;

        for entry in &self.entries {
            write!(file, "{}", entry)
                .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;
        }

        debug!("Wrote {} cue(s) to {}", self.entries.len(), path.display());
        Ok(())
    }
}

impl fmt::Display for SubtitleTrack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for entry in &self.entries {
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}

/// One cue per word with non-blank text.
///
/// Numbering starts at 1 and counts only the emitted cues.
pub fn render_word_cues(words: &[WordTimestamp]) -> SubtitleTrack {
    let entries = words
        .iter()
        .filter(|word| !word.text.trim().is_empty())
        .enumerate()
        .map(|(i, word)| SubtitleCue::new(i + 1, word.start_time, word.end_time, word.text.clone()))
        .collect();

    SubtitleTrack::new(entries)
}

/// One cue per matched segment, in the given (start-sorted) order.
///
/// Numbering follows the position in `segments`, so a skipped blank segment
/// leaves a gap. Word cues are numbered without gaps; both conventions are
/// relied on downstream.
pub fn render_sentence_cues(segments: &[MatchedSegment]) -> SubtitleTrack {
    let entries = segments
        .iter()
        .enumerate()
        .filter(|(_, segment)| !segment.text.trim().is_empty())
        .map(|(i, segment)| {
            SubtitleCue::new(i + 1, segment.start_time, segment.end_time, segment.text.clone())
        })
        .collect();

    SubtitleTrack::new(entries)
}
