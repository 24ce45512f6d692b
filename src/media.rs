/*!
 * Audio extraction from video files.
 *
 * Video inputs are converted with `ffmpeg` to 16 kHz mono WAV, the format
 * forced aligners expect, inside a temporary directory owned by the caller.
 */

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use tokio::process::Command;

/// Sample rate of extracted audio
pub const EXTRACTED_SAMPLE_RATE: u32 = 16_000;

/// Default time allowed for one extraction
pub const DEFAULT_EXTRACTION_TIMEOUT_SECS: u64 = 600;

/// Audio track extracted to a temporary file
///
/// The file is deleted when this value is dropped.
#[derive(Debug)]
pub struct ExtractedAudio {
    path: PathBuf,
    _dir: TempDir,
}

impl ExtractedAudio {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Media extraction helpers
pub struct MediaExtractor;

impl MediaExtractor {
    /// Build the ffmpeg arguments converting `input` to a mono WAV at `output`
    pub fn ffmpeg_args(input: &Path, output: &Path) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-v".to_string(),
            "error".to_string(),
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-vn".to_string(),
            "-ac".to_string(),
            "1".to_string(),
            "-ar".to_string(),
            EXTRACTED_SAMPLE_RATE.to_string(),
            "-f".to_string(),
            "wav".to_string(),
            output.to_string_lossy().to_string(),
        ]
    }

    /// Extract the audio track of a video file
    pub async fn extract_audio(video: &Path, timeout_secs: u64) -> Result<ExtractedAudio> {
        if !video.is_file() {
            return Err(anyhow!("Video file does not exist: {:?}", video));
        }

        let dir = tempfile::Builder::new()
            .prefix("textsync-media-")
            .tempdir()
            .context("Failed to create temporary directory for audio extraction")?;

        let stem = video.file_stem().unwrap_or_default().to_string_lossy();
        let output = dir.path().join(format!("{}.wav", stem));
        let args = Self::ffmpeg_args(video, &output);

        info!("Extracting audio from {:?}", video);
        debug!("ffmpeg {}", args.join(" "));

        let child = Command::new("ffmpeg").args(&args).kill_on_drop(true).output();

        let output_result = tokio::select! {
            result = child => {
                result.context("Failed to execute ffmpeg command")?
            },
            _ = tokio::time::sleep(Duration::from_secs(timeout_secs)) => {
                return Err(anyhow!("Audio extraction timed out after {} seconds", timeout_secs));
            }
        };

        if !output_result.status.success() {
            let stderr = String::from_utf8_lossy(&output_result.stderr);
            return Err(anyhow!("ffmpeg failed ({}): {}", output_result.status, stderr.trim()));
        }

        if !output.is_file() {
            return Err(anyhow!("ffmpeg produced no audio file for {:?}", video));
        }

        Ok(ExtractedAudio { path: output, _dir: dir })
    }
}
