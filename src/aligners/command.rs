use async_trait::async_trait;
use log::{debug, error};
use std::io::Write;
use std::time::Duration;
use tokio::process::Command;

use super::{parse_word_records, AlignmentRequest, AlignmentSource};
use crate::alignment::WordTimestamp;
use crate::app_config::CommandAlignerConfig;
use crate::errors::AlignerError;

/// Number of trailing stderr lines kept in error messages
const STDERR_TAIL_LINES: usize = 20;

/// Alignment source running an external aligner program.
///
/// Arguments may contain `{audio}`, `{text_file}` and `{language}`. The
/// transcript is written to a temporary file whose path replaces
/// `{text_file}`. The program must print word timestamp JSON on stdout.
#[derive(Debug, Clone)]
pub struct CommandAligner {
    program: String,
    args: Vec<String>,
    timeout_secs: u64,
}

impl CommandAligner {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout_secs: u64) -> Self {
        Self {
            program: program.into(),
            args,
            timeout_secs,
        }
    }

    pub fn from_config(config: &CommandAlignerConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone(), config.timeout_secs)
    }

    /// Substitute placeholders in the configured arguments
    pub fn expand_args(&self, request: &AlignmentRequest, text_file: &str) -> Vec<String> {
        let audio = request.audio.to_string_lossy();
        self.args
            .iter()
            .map(|arg| {
                arg.replace("{audio}", &audio)
                    .replace("{text_file}", text_file)
                    .replace("{language}", &request.language)
            })
            .collect()
    }

    fn stderr_tail(stderr: &str) -> String {
        let lines: Vec<&str> = stderr
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();

        if lines.is_empty() {
            return "no error output".to_string();
        }

        let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
        lines[start..].join("\n")
    }
}

#[async_trait]
impl AlignmentSource for CommandAligner {
    async fn align(&self, request: &AlignmentRequest) -> Result<Vec<WordTimestamp>, AlignerError> {
        let mut text_file = tempfile::Builder::new()
            .prefix("textsync-")
            .suffix(".txt")
            .tempfile()?;
        text_file.write_all(request.text.as_bytes())?;
        text_file.flush()?;

        let text_path = text_file.path().to_string_lossy().to_string();
        let args = self.expand_args(request, &text_path);
        debug!("Running aligner: {} {}", self.program, args.join(" "));

        let child = Command::new(&self.program)
            .args(&args)
            .kill_on_drop(true)
            .output();

        let timeout_duration = Duration::from_secs(self.timeout_secs);
        let output = tokio::select! {
            result = child => {
                result.map_err(|e| AlignerError::RequestFailed(
                    format!("failed to start aligner {:?}: {}", self.program, e)
                ))?
            },
            _ = tokio::time::sleep(timeout_duration) => {
                return Err(AlignerError::Timeout { secs: self.timeout_secs });
            }
        };

        if !output.status.success() {
            let stderr = Self::stderr_tail(&String::from_utf8_lossy(&output.stderr));
            error!("Aligner command failed: {}", stderr);
            return Err(AlignerError::CommandFailed {
                status: output.status.to_string(),
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_word_records(&stdout)
    }

    fn name(&self) -> &str {
        "command"
    }
}
