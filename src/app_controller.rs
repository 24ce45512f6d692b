use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::aligners::{create_source, AlignmentRequest, AlignmentSource};
use crate::alignment::{AlignmentSession, DelimiterSet, MatchedSegment};
use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::media::{MediaExtractor, DEFAULT_EXTRACTION_TIMEOUT_SECS};
use crate::report::{AlignmentReport, Statistics};
use crate::subtitle_exporter::{render_sentence_cues, render_word_cues};
use crate::text_input::TextInput;

// @module: Application controller for alignment sessions

/// Audio source of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaInput {
    // @variant: Audio file handed to the aligner as is
    Audio(PathBuf),
    // @variant: Video file whose audio track is extracted first
    Video(PathBuf),
}

impl MediaInput {
    pub fn path(&self) -> &Path {
        match self {
            Self::Audio(path) | Self::Video(path) => path,
        }
    }
}

/// Per-file output path overrides
#[derive(Debug, Clone, Default)]
pub struct OutputOverrides {
    pub json: Option<PathBuf>,
    pub word_srt: Option<PathBuf>,
    pub sentence_srt: Option<PathBuf>,
}

/// Everything one session needs
#[derive(Debug, Clone)]
pub struct ProcessRequest {
    pub text: TextInput,
    pub media: MediaInput,
    pub outputs: OutputOverrides,
    pub force_overwrite: bool,
}

impl ProcessRequest {
    pub fn new(text: TextInput, media: MediaInput) -> Self {
        Self {
            text,
            media,
            outputs: OutputOverrides::default(),
            force_overwrite: false,
        }
    }
}

/// Files written by a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub json: PathBuf,
    pub word_srt: PathBuf,
    pub sentence_srt: PathBuf,
}

impl OutputFiles {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Path)> {
        [
            ("json", self.json.as_path()),
            ("word_srt", self.word_srt.as_path()),
            ("sentence_srt", self.sentence_srt.as_path()),
        ]
        .into_iter()
    }
}

/// Result of a completed session
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub segments: Vec<MatchedSegment>,
    pub statistics: Statistics,
    pub output_files: OutputFiles,
    /// Indices of segments that found no acceptable window
    pub dropped: Vec<usize>,
}

/// Main application controller for alignment sessions
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Delimiters built from the configured punctuation
    delimiters: DelimiterSet,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let delimiters = DelimiterSet::new(&config.segmentation.punctuation)
            .context("Invalid punctuation in configuration")?;

        Ok(Self { config, delimiters })
    }

    /// Output paths for a request: overrides first, otherwise named after the media stem
    pub fn output_files(&self, request: &ProcessRequest) -> OutputFiles {
        let media = request.media.path();
        let dir = &self.config.output.directory;
        let output = &self.config.output;

        OutputFiles {
            json: request
                .outputs
                .json
                .clone()
                .unwrap_or_else(|| FileManager::generate_output_path(media, dir, &output.json_suffix)),
            word_srt: request
                .outputs
                .word_srt
                .clone()
                .unwrap_or_else(|| FileManager::generate_output_path(media, dir, &output.word_srt_suffix)),
            sentence_srt: request.outputs.sentence_srt.clone().unwrap_or_else(|| {
                FileManager::generate_output_path(media, dir, &output.sentence_srt_suffix)
            }),
        }
    }

    /// Run a session with the alignment source selected in the configuration
    ///
    /// Returns `None` when outputs already exist and overwriting is not forced.
    pub async fn run(&self, request: ProcessRequest) -> Result<Option<ProcessOutcome>> {
        let source = create_source(&self.config.aligner).context("Failed to create alignment source")?;
        self.run_with_source(request, source.as_ref()).await
    }

    /// Run a session with the given alignment source
    pub async fn run_with_source(
        &self,
        request: ProcessRequest,
        source: &dyn AlignmentSource,
    ) -> Result<Option<ProcessOutcome>> {
        let start_time = std::time::Instant::now();

        let media_path = request.media.path();
        if !media_path.is_file() {
            return Err(anyhow!("Media file does not exist: {:?}", media_path));
        }

        let output_files = self.output_files(&request);
        if !request.force_overwrite {
            if let Some((_, existing)) = output_files.iter().find(|(_, path)| path.exists()) {
                warn!(
                    "Skipping {:?}, output already exists: {:?} (use -y to overwrite)",
                    media_path, existing
                );
                return Ok(None);
            }
        }

        let text = request.text.resolve()?;
        let text_segments = self.delimiters.split(&text);
        info!("Split transcript into {} segment(s)", text_segments.len());

        // Keeps the extracted audio alive until alignment is done
        let extracted = match &request.media {
            MediaInput::Audio(_) => None,
            MediaInput::Video(video) => {
                Some(MediaExtractor::extract_audio(video, DEFAULT_EXTRACTION_TIMEOUT_SECS).await?)
            }
        };
        let audio_path = extracted
            .as_ref()
            .map(|audio| audio.path().to_path_buf())
            .unwrap_or_else(|| media_path.to_path_buf());

        let language = language_utils::aligner_language_name(&self.config.language);
        let alignment_request = AlignmentRequest::new(audio_path, text, language);

        let spinner = Self::spinner(format!("Aligning with {} aligner", source.name()));
        let aligned = source.align(&alignment_request).await;
        spinner.finish_and_clear();
        drop(extracted);

        let word_timestamps =
            aligned.with_context(|| format!("Alignment failed for {:?}", media_path))?;
        info!(
            "Received {} word timestamp(s) from {} aligner",
            word_timestamps.len(),
            source.name()
        );

        let session = AlignmentSession::new(self.delimiters.clone(), text_segments, word_timestamps);
        let outcome = session.match_segments().context("Failed to match segments")?;

        let report = AlignmentReport::build(&session, &outcome, self.config.segmentation.split_mode);
        report.save(&output_files.json)?;
        render_word_cues(&session.word_timestamps).write_to_srt(&output_files.word_srt)?;
        render_sentence_cues(&outcome.segments).write_to_srt(&output_files.sentence_srt)?;

        for (kind, path) in output_files.iter() {
            info!("Wrote {}: {}", kind, path.display());
        }
        info!("Completed in {}", Self::format_duration(start_time.elapsed()));

        Ok(Some(ProcessOutcome {
            segments: outcome.segments,
            statistics: report.statistics,
            output_files,
            dropped: outcome.dropped,
        }))
    }

    fn spinner(message: String) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
