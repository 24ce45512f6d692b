// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use textsync::app_config::{self, AlignerProvider, Config};
use textsync::app_controller::{Controller, MediaInput, OutputOverrides, ProcessOutcome, ProcessRequest};
use textsync::text_input::TextInput;

/// CLI Wrapper for AlignerProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliAlignerProvider {
    Command,
    Http,
    JsonFile,
}

impl From<CliAlignerProvider> for AlignerProvider {
    fn from(cli_provider: CliAlignerProvider) -> Self {
        match cli_provider {
            CliAlignerProvider::Command => AlignerProvider::Command,
            CliAlignerProvider::Http => AlignerProvider::Http,
            CliAlignerProvider::JsonFile => AlignerProvider::JsonFile,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Align a transcript with its recording (default command)
    Align(AlignArgs),

    /// Generate shell completions for textsync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct AlignArgs {
    /// Transcript text, or path to a UTF-8 transcript file
    #[arg(short, long)]
    text: Option<String>,

    /// Audio file to align against
    #[arg(short, long, conflicts_with = "video")]
    audio: Option<PathBuf>,

    /// Video file; its audio track is extracted with ffmpeg
    #[arg(short, long)]
    video: Option<PathBuf>,

    /// Language name or ISO code (e.g. 'Japanese', 'ja')
    #[arg(short, long)]
    language: Option<String>,

    /// Delimiter characters that end a segment
    #[arg(short, long)]
    punctuation: Option<String>,

    /// Alignment source to use
    #[arg(long, value_enum)]
    aligner: Option<CliAlignerProvider>,

    /// Use precomputed word timestamps from a JSON file instead of an aligner
    #[arg(long, value_name = "FILE")]
    word_timestamps: Option<PathBuf>,

    /// Directory receiving the output files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path of the JSON result record
    #[arg(long)]
    json_output: Option<PathBuf>,

    /// Path of the word-level SRT file
    #[arg(long)]
    word_srt_output: Option<PathBuf>,

    /// Path of the sentence-level SRT file
    #[arg(long)]
    sentence_srt_output: Option<PathBuf>,

    /// Overwrite existing output files
    #[arg(short = 'y', long = "yes")]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// textsync - transcript-to-audio subtitle alignment
///
/// Splits a transcript into sentences, aligns it with its recording and
/// writes word-level and sentence-level subtitles.
#[derive(Parser, Debug)]
#[command(name = "textsync")]
#[command(version)]
#[command(about = "Align transcripts with audio and export subtitles")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "textsync splits a transcript at punctuation, obtains word timestamps from a forced aligner and writes SRT subtitles.

EXAMPLES:
    textsync -t 'こんにちは。元気ですか？' -a 1-1.mp3          # Inline transcript
    textsync -t text.txt -a 1-1.mp3 -l Japanese -y          # Transcript file, overwrite outputs
    textsync -t text.txt -v clip.mp4                         # Extract audio from a video first
    textsync -t text.txt -a 1-1.mp3 -p ',.!?。！？'           # Custom delimiters
    textsync -t text.txt -a 1-1.mp3 --word-timestamps w.json # Reuse saved word timestamps
    textsync completions bash > textsync.bash                # Generate bash completions

OUTPUTS:
    <stem>.json           Result record with segments, statistics and raw data
    <stem>_word.srt       One cue per aligned word
    <stem>_sentence.srt   One cue per matched sentence

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    align: AlignArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set via set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "textsync", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Align(args)) => run_align(args).await,
        None => run_align(cli.align).await,
    }
}

/// Load the configuration file, creating a default one when missing
fn load_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;
        Ok(config)
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        Ok(config)
    }
}

/// Apply command line overrides on top of the file configuration
fn apply_overrides(config: &mut Config, options: &AlignArgs) {
    if let Some(language) = &options.language {
        config.language = language.clone();
    }

    if let Some(punctuation) = &options.punctuation {
        config.segmentation.punctuation = punctuation.clone();
    }

    if let Some(provider) = &options.aligner {
        config.aligner.provider = provider.clone().into();
    }

    if let Some(path) = &options.word_timestamps {
        config.aligner.provider = AlignerProvider::JsonFile;
        config.aligner.json_file.path = path.clone();
    }

    if let Some(output_dir) = &options.output_dir {
        config.output.directory = output_dir.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}

async fn run_align(options: AlignArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    let text = options
        .text
        .as_deref()
        .ok_or_else(|| anyhow!("A transcript is required (-t TEXT_OR_FILE)"))?;

    let media = match (&options.audio, &options.video) {
        (Some(audio), None) => MediaInput::Audio(audio.clone()),
        (None, Some(video)) => MediaInput::Video(video.clone()),
        (Some(_), Some(_)) => return Err(anyhow!("Audio and video inputs are mutually exclusive")),
        (None, None) => return Err(anyhow!("An audio (-a) or video (-v) file is required")),
    };

    let mut config = load_config(&options.config_path)?;
    apply_overrides(&mut config, &options);

    config.validate().context("Configuration validation failed")?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)?;

    let request = ProcessRequest {
        text: TextInput::detect(text),
        media,
        outputs: OutputOverrides {
            json: options.json_output.clone(),
            word_srt: options.word_srt_output.clone(),
            sentence_srt: options.sentence_srt_output.clone(),
        },
        force_overwrite: options.force_overwrite,
    };

    if let Some(outcome) = controller.run(request).await? {
        print_summary(&outcome);
    }

    Ok(())
}

fn print_summary(outcome: &ProcessOutcome) {
    let stats = &outcome.statistics;

    println!("Output files:");
    for (kind, path) in outcome.output_files.iter() {
        println!("  - {}: {}", kind, path.display());
    }

    println!("Statistics:");
    println!("  - segments: {}", stats.total_segments);
    println!("  - words: {}", stats.total_words);
    println!(
        "  - match rate: {}/{} ({:.1}%)",
        stats.matched_segments,
        stats.total_segments,
        stats.match_rate() * 100.0
    );

    if !outcome.dropped.is_empty() {
        println!("  - unmatched segments: {}", outcome.dropped.len());
    }
}
