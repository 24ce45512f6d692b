/*!
 * Integration tests for sessions replaying saved word timestamps
 */

use anyhow::Result;

use textsync::alignment::WordTimestamp;
use textsync::app_config::AlignerProvider;
use textsync::app_controller::{Controller, MediaInput, ProcessRequest};
use textsync::report::AlignmentReport;
use textsync::text_input::TextInput;

use crate::common;

/// Test a session driven by a precomputed timestamp file
#[tokio::test]
async fn test_run_withJsonFileProvider_shouldUseSavedWords() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let audio = common::create_test_audio(temp_dir.path(), "1-1.wav")?;
    let words_json = serde_json::to_string(&common::hello_world_words())?;
    let words_path = common::create_test_file(temp_dir.path(), "words.json", &words_json)?;

    let mut config = common::config_with_output_dir(&temp_dir.path().join("out"));
    config.aligner.provider = AlignerProvider::JsonFile;
    config.aligner.json_file.path = words_path;
    config.validate()?;

    let controller = Controller::with_config(config)?;
    let request = ProcessRequest::new(
        TextInput::InlineText("Hello. World!".to_string()),
        MediaInput::Audio(audio),
    );

    let outcome = controller.run(request).await?.expect("session should not be skipped");
    assert_eq!(outcome.statistics.matched_segments, 2);
    assert!(temp_dir.path().join("out/1-1_sentence.srt").is_file());
    Ok(())
}

/// Test that a previous result record can be replayed with another transcript split
#[tokio::test]
async fn test_run_withPreviousReport_shouldReplayRawWords() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let audio = common::create_test_audio(temp_dir.path(), "1-1.wav")?;
    let words_json = serde_json::to_string(&common::hello_world_words())?;
    let words_path = common::create_test_file(temp_dir.path(), "words.json", &words_json)?;

    // First pass writes a result record
    let mut config = common::config_with_output_dir(&temp_dir.path().join("first"));
    config.aligner.provider = AlignerProvider::JsonFile;
    config.aligner.json_file.path = words_path;
    let first = Controller::with_config(config)?
        .run(ProcessRequest::new(
            TextInput::InlineText("Hello. World!".to_string()),
            MediaInput::Audio(audio.clone()),
        ))
        .await?
        .expect("session should not be skipped");

    // Second pass reads the words back from that record, splitting only at '!'
    let mut config = common::config_with_output_dir(&temp_dir.path().join("second"));
    config.aligner.provider = AlignerProvider::JsonFile;
    config.aligner.json_file.path = first.output_files.json.clone();
    config.segmentation.punctuation = "!".to_string();
    let second = Controller::with_config(config)?
        .run(ProcessRequest::new(
            TextInput::InlineText("Hello. World!".to_string()),
            MediaInput::Audio(audio),
        ))
        .await?
        .expect("session should not be skipped");

    assert_eq!(second.statistics.total_segments, 1);
    assert_eq!(second.statistics.total_words, 4);
    assert_eq!(second.segments[0].text, "Hello. World!");

    let report = AlignmentReport::load(&second.output_files.json)?;
    assert_eq!(report.raw_data.word_timestamps, common::hello_world_words());
    assert_eq!(report.statistics.punctuation_used.as_deref(), Some("!"));
    Ok(())
}

/// Test that an invalid record in the file stops the session
#[tokio::test]
async fn test_run_withInvalidSavedWords_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let audio = common::create_test_audio(temp_dir.path(), "1-1.wav")?;
    let words = vec![WordTimestamp::new("Hello", 1.0, 0.5)];
    let words_path =
        common::create_test_file(temp_dir.path(), "words.json", &serde_json::to_string(&words)?)?;

    let mut config = common::config_with_output_dir(temp_dir.path());
    config.aligner.provider = AlignerProvider::JsonFile;
    config.aligner.json_file.path = words_path;

    let result = Controller::with_config(config)?
        .run(ProcessRequest::new(
            TextInput::InlineText("Hello.".to_string()),
            MediaInput::Audio(audio),
        ))
        .await;

    let error = result.expect_err("session should fail");
    assert!(format!("{:#}", error).contains("Invalid word timestamp record"));
    Ok(())
}
