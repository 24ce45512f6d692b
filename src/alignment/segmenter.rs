use anyhow::{Context, Result};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

// @module: Delimiter-based text segmentation

/// Sentence punctuation used when the caller does not configure any
pub const DEFAULT_PUNCTUATION: &str = ",.?!、，。！？";

// @const: Compiled default delimiter set
static DEFAULT_DELIMITERS: Lazy<DelimiterSet> = Lazy::new(|| {
    DelimiterSet::new(DEFAULT_PUNCTUATION).unwrap()
});

/// One delimiter-bounded unit of source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSegment {
    /// Position in the original transcript (0-based)
    pub index: usize,

    /// Trimmed segment text, never empty
    pub text: String,
}

impl TextSegment {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

impl fmt::Display for TextSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Configured set of delimiter characters.
///
/// Holds two compiled patterns: one matching a single delimiter (used to cut
/// the text after every delimiter) and one matching delimiters or whitespace
/// (used to build comparison keys).
#[derive(Debug, Clone)]
pub struct DelimiterSet {
    punctuation: String,
    split_pattern: Option<Regex>,
    strip_pattern: Regex,
}

impl DelimiterSet {
    /// Build a delimiter set from a string where every character is a delimiter
    pub fn new(punctuation: &str) -> Result<Self> {
        let class: String = punctuation
            .chars()
            .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
            .collect();

        let split_pattern = if class.is_empty() {
            None
        } else {
            Some(
                Regex::new(&format!("[{}]", class))
                    .with_context(|| format!("Invalid delimiter set: {:?}", punctuation))?,
            )
        };

        let strip_pattern = Regex::new(&format!(r"[{}\s]", class))
            .with_context(|| format!("Invalid delimiter set: {:?}", punctuation))?;

        Ok(Self {
            punctuation: punctuation.to_string(),
            split_pattern,
            strip_pattern,
        })
    }

    /// The delimiter characters as configured
    pub fn as_str(&self) -> &str {
        &self.punctuation
    }

    pub fn is_empty(&self) -> bool {
        self.punctuation.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.punctuation.contains(c)
    }

    /// Number of delimiter characters ending `text`, ignoring trailing whitespace
    pub fn trailing_count(&self, text: &str) -> usize {
        text.trim_end()
            .chars()
            .rev()
            .take_while(|c| self.contains(*c))
            .count()
    }

    /// Remove every delimiter and whitespace character, then case-fold.
    pub fn normalize(&self, text: &str) -> String {
        self.strip_pattern.replace_all(text, "").to_lowercase()
    }

    /// Split text after every delimiter character.
    ///
    /// Pieces are trimmed and empty pieces dropped, so trailing or repeated
    /// delimiters never yield empty segments. Empty input yields no segments.
    pub fn split(&self, text: &str) -> Vec<TextSegment> {
        let mut pieces: Vec<&str> = Vec::new();

        match &self.split_pattern {
            Some(pattern) => {
                let mut last = 0;
                for m in pattern.find_iter(text) {
                    pieces.push(&text[last..m.end()]);
                    last = m.end();
                }
                pieces.push(&text[last..]);
            }
            None => pieces.push(text),
        }

        let segments: Vec<TextSegment> = pieces
            .into_iter()
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .enumerate()
            .map(|(index, piece)| TextSegment::new(index, piece))
            .collect();

        debug!(
            "Split {} chars into {} segment(s) using {:?}",
            text.chars().count(),
            segments.len(),
            self.punctuation
        );

        segments
    }
}

impl Default for DelimiterSet {
    fn default() -> Self {
        DEFAULT_DELIMITERS.clone()
    }
}

/// Split `text` into ordered segments using `delimiters`
pub fn split(text: &str, delimiters: &DelimiterSet) -> Vec<TextSegment> {
    delimiters.split(text)
}
