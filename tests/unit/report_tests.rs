/*!
 * Tests for the JSON result record
 */

use anyhow::Result;

use textsync::aligners::parse_word_records;
use textsync::alignment::{AlignmentSession, DelimiterSet};
use textsync::app_config::SplitMode;
use textsync::report::AlignmentReport;

use crate::common;

fn hello_world_report() -> AlignmentReport {
    let session = AlignmentSession::from_text(
        "Hello. Zzz. World!",
        DelimiterSet::default(),
        common::hello_world_words(),
    );
    let outcome = session.match_segments().unwrap();
    AlignmentReport::build(&session, &outcome, SplitMode::Punctuation)
}

#[test]
fn test_build_withDroppedSegment_shouldReportUnderCoverage() {
    let report = hello_world_report();
    let stats = &report.statistics;

    assert_eq!(stats.total_segments, 3);
    assert_eq!(stats.matched_segments, 2);
    assert!(stats.matched_segments < stats.total_segments);
    assert_eq!(stats.total_words, 4);
    assert_eq!(stats.total_duration, 1.5);
    assert_eq!(report.raw_data.text_segments, vec!["Hello.", "Zzz.", "World!"]);
}

#[test]
fn test_save_shouldKeepNonAsciiTextReadable() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let session = AlignmentSession::from_text(
        "こんにちは。",
        DelimiterSet::default(),
        common::char_words("こんにちは。", 0.0, 0.1),
    );
    let outcome = session.match_segments()?;
    let report = AlignmentReport::build(&session, &outcome, SplitMode::Punctuation);

    let path = temp_dir.path().join("ja.json");
    report.save(&path)?;

    let content = std::fs::read_to_string(&path)?;
    assert!(content.contains("こんにちは。"));
    assert!(content.contains("\"punctuation_used\""));
    Ok(())
}

#[test]
fn test_savedReport_shouldReplayAsWordTimestampSource() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("result.json");
    let report = hello_world_report();
    report.save(&path)?;

    let content = std::fs::read_to_string(&path)?;
    let words = parse_word_records(&content)?;
    assert_eq!(words, common::hello_world_words());

    let loaded = AlignmentReport::load(&path)?;
    assert_eq!(loaded.statistics, report.statistics);
    Ok(())
}

#[test]
fn test_load_withMalformedFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "bad.json", "{\"segments\": 3}")?;
    assert!(AlignmentReport::load(&path).is_err());
    Ok(())
}
