/*!
 * Tests for application configuration
 */

use std::path::PathBuf;

use textsync::app_config::{AlignerProvider, Config, LogLevel, SplitMode};

#[test]
fn test_defaultConfig_shouldMatchDocumentedDefaults() {
    let config = Config::default();

    assert_eq!(config.language, "Japanese");
    assert_eq!(config.segmentation.split_mode, SplitMode::Punctuation);
    assert_eq!(config.segmentation.punctuation, ",.?!、，。！？");
    assert_eq!(config.aligner.provider, AlignerProvider::Http);
    assert_eq!(config.aligner.http.endpoint, "http://localhost:8000");
    assert_eq!(config.output.json_suffix, ".json");
    assert_eq!(config.output.word_srt_suffix, "_word.srt");
    assert_eq!(config.output.sentence_srt_suffix, "_sentence.srt");
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_serialize_thenDeserialize_shouldKeepValues() {
    let mut config = Config::default();
    config.language = "English".to_string();
    config.aligner.provider = AlignerProvider::Command;
    config.aligner.command.program = "qwen-align".to_string();

    let json = serde_json::to_string_pretty(&config).unwrap();
    assert!(json.contains("\"provider\": \"command\""));
    assert!(json.contains("\"split_mode\": \"punctuation\""));

    let parsed: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.language, "English");
    assert_eq!(parsed.aligner.provider, AlignerProvider::Command);
    assert_eq!(parsed.aligner.command.program, "qwen-align");
    assert!(parsed.validate().is_ok());
}

#[test]
fn test_deserialize_withEmptyObject_shouldUseDefaults() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config.language, "Japanese");
    assert_eq!(config.aligner.command.args, vec!["{audio}", "{text_file}", "{language}"]);
}

#[test]
fn test_validate_withZeroTimeouts_shouldFail() {
    let mut config = Config::default();
    config.aligner.http.timeout_secs = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.aligner.provider = AlignerProvider::Command;
    config.aligner.command.program = "align".to_string();
    config.aligner.command.timeout_secs = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withJsonFileProviderAndNoPath_shouldFail() {
    let mut config = Config::default();
    config.aligner.provider = AlignerProvider::JsonFile;
    assert!(config.validate().is_err());

    config.aligner.json_file.path = PathBuf::from("words.json");
    assert!(config.validate().is_ok());
}

#[test]
fn test_logLevel_shouldMapToLevelFilter() {
    assert_eq!(LogLevel::Debug.to_level_filter(), log::LevelFilter::Debug);
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
}
