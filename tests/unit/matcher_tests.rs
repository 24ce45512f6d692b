/*!
 * Tests for the segment matcher and its invariants
 */

use std::collections::HashSet;

use textsync::alignment::{
    AlignmentSession, ConsumptionLedger, DelimiterSet, MatchOutcome, Matcher, WordTimestamp,
    ACCEPTANCE_THRESHOLD, MAX_WINDOW_WORDS,
};
use textsync::errors::MatchError;

use crate::common;

/// Check the invariants every matching outcome must satisfy
fn assert_outcome_invariants(session: &AlignmentSession, outcome: &MatchOutcome) {
    let mut seen = HashSet::new();
    let mut consumed = 0;

    for segment in &outcome.segments {
        for index in segment.word_range.clone() {
            assert!(seen.insert(index), "word {} consumed twice", index);
        }
        consumed += segment.word_range.len();

        assert!(segment.match_score > ACCEPTANCE_THRESHOLD && segment.match_score <= 1.0);
        assert!(segment.word_range.len() <= MAX_WINDOW_WORDS);
        assert_eq!(segment.words, session.word_timestamps[segment.word_range.clone()].to_vec());
        assert_eq!(segment.start_time, segment.words[0].start_time);
        assert_eq!(segment.end_time, segment.words[segment.words.len() - 1].end_time);
    }

    for pair in outcome.segments.windows(2) {
        assert!(pair[0].start_time <= pair[1].start_time, "segments not sorted by start time");
    }

    assert!(outcome.matched_count() <= session.text_segments.len());
    assert!(consumed <= session.word_timestamps.len());
    assert_eq!(consumed, outcome.consumed_word_count());
    assert_eq!(outcome.matched_count() + outcome.dropped.len(), session.text_segments.len());
}

#[test]
fn test_match_withHelloWorld_shouldAbsorbTrailingPunctuation() {
    let session = AlignmentSession::from_text(
        "Hello. World!",
        DelimiterSet::new(".!").unwrap(),
        common::hello_world_words(),
    );
    let outcome = session.match_segments().unwrap();

    assert_eq!(outcome.matched_count(), 2);
    let first = &outcome.segments[0];
    assert_eq!(first.text, "Hello.");
    assert_eq!((first.start_time, first.end_time), (0.0, 0.6));
    assert_eq!(first.match_score, 1.0);

    let second = &outcome.segments[1];
    assert_eq!(second.text, "World!");
    assert_eq!((second.start_time, second.end_time), (1.0, 1.5));
    assert_eq!(second.match_score, 1.0);

    assert_eq!(outcome.consumed_word_count(), 4);
    assert_outcome_invariants(&session, &outcome);
}

#[test]
fn test_match_withNoWords_shouldFailWithInsufficientInput() {
    let session = AlignmentSession::from_text("Hello. World!", DelimiterSet::default(), Vec::new());
    assert_eq!(
        session.match_segments().unwrap_err(),
        MatchError::InsufficientInput {
            text_segments: 2,
            word_timestamps: 0
        }
    );
}

#[test]
fn test_match_withNoSegments_shouldFailWithInsufficientInput() {
    let session = AlignmentSession::from_text("", DelimiterSet::default(), common::hello_world_words());
    assert!(matches!(
        session.match_segments(),
        Err(MatchError::InsufficientInput { text_segments: 0, .. })
    ));
}

#[test]
fn test_match_withUnrelatedSegment_shouldDropOnlyThatSegment() {
    let session = AlignmentSession::from_text(
        "Hello. Zzz. World!",
        DelimiterSet::default(),
        common::hello_world_words(),
    );
    let outcome = session.match_segments().unwrap();

    assert_eq!(outcome.matched_count(), session.text_segments.len() - 1);
    assert_eq!(outcome.dropped, vec![1]);
    assert_outcome_invariants(&session, &outcome);
}

#[test]
fn test_match_withRepeatedSentence_shouldGiveEachOccurrenceItsOwnWords() {
    let words = vec![
        WordTimestamp::new("a", 0.0, 0.1),
        WordTimestamp::new("b", 0.1, 0.2),
        WordTimestamp::new(".", 0.2, 0.3),
        WordTimestamp::new("a", 1.0, 1.1),
        WordTimestamp::new("b", 1.1, 1.2),
        WordTimestamp::new(".", 1.2, 1.3),
    ];
    let session = AlignmentSession::from_text("ab. ab.", DelimiterSet::default(), words);
    let outcome = session.match_segments().unwrap();

    assert_eq!(outcome.segments[0].word_range, 0..3);
    assert_eq!(outcome.segments[1].word_range, 3..6);
    assert_outcome_invariants(&session, &outcome);
}

#[test]
fn test_match_withOutOfOrderTimestamps_shouldSortByStartTime() {
    let words = vec![
        WordTimestamp::new("a", 5.0, 5.1),
        WordTimestamp::new("b", 5.1, 5.2),
        WordTimestamp::new(".", 5.2, 5.3),
        WordTimestamp::new("c", 0.0, 0.1),
        WordTimestamp::new("d", 0.1, 0.2),
        WordTimestamp::new(".", 0.2, 0.3),
    ];
    let session = AlignmentSession::from_text("ab. cd.", DelimiterSet::default(), words);
    let outcome = session.match_segments().unwrap();

    let order: Vec<&str> = outcome.segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(order, vec!["cd.", "ab."]);
    assert_outcome_invariants(&session, &outcome);
}

#[test]
fn test_matchWithLedger_withConsumedWords_shouldNeverReuseThem() {
    let delimiters = DelimiterSet::default();
    let segments = delimiters.split("Hello. World!");
    let words = common::hello_world_words();

    let mut ledger = ConsumptionLedger::new(words.len());
    assert!(ledger.consume(0..2));

    let outcome = Matcher::new(delimiters)
        .match_with_ledger(&segments, &words, ledger)
        .unwrap();

    assert_eq!(outcome.matched_count(), 1);
    assert_eq!(outcome.segments[0].text, "World!");
    assert_eq!(outcome.dropped, vec![0]);
}

#[test]
fn test_match_withVariousTranscripts_shouldHoldInvariants() {
    let long_sentence: Vec<String> = (0..45).map(|i| format!("w{}", i)).collect();
    let long_text = format!("{}. tail end.", long_sentence.join(" "));

    let cases: Vec<(String, Vec<WordTimestamp>)> = vec![
        (
            "the cat sat. on the mat! a dog ran, far away? yes.".to_string(),
            common::token_words("the cat sat. on the mat! a dog ran, far away? yes.", 0.3),
        ),
        (
            "the cat sat. something else entirely! on the mat.".to_string(),
            common::token_words("the cat sat. on the mat.", 0.3),
        ),
        (
            "今日は晴れ。明日は雨かな？".to_string(),
            common::char_words("今日は晴れ。明日は雨かな？", 0.0, 0.15),
        ),
        (
            "今日は晴れ。全然違う文。明日は雨かな？".to_string(),
            common::char_words("今日は晴れ。明日は雨", 2.0, 0.2),
        ),
        (long_text.clone(), common::token_words(&long_text, 0.25)),
    ];

    for (text, words) in cases {
        let session = AlignmentSession::from_text(&text, DelimiterSet::default(), words);
        let outcome = session.match_segments().unwrap();
        assert_outcome_invariants(&session, &outcome);
    }
}

#[test]
fn test_match_withDelimiterOnlySegment_shouldTakeTheFreePunctuationToken() {
    let words = vec![
        WordTimestamp::new("Really", 0.0, 0.5),
        WordTimestamp::new("?", 0.5, 0.6),
        WordTimestamp::new("!", 0.6, 0.7),
        WordTimestamp::new("Yes", 1.0, 1.3),
        WordTimestamp::new(".", 1.3, 1.4),
    ];
    let session = AlignmentSession::from_text("Really?! Yes.", DelimiterSet::default(), words);
    let outcome = session.match_segments().unwrap();

    let texts: Vec<&str> = outcome.segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["Really?", "!", "Yes."]);

    let punctuation = &outcome.segments[1];
    assert_eq!(punctuation.word_range, 2..3);
    assert_eq!((punctuation.start_time, punctuation.end_time), (0.6, 0.7));
    assert_eq!(punctuation.match_score, 1.0);

    let last = &outcome.segments[2];
    assert_eq!(last.word_range, 3..5);
    assert_eq!(last.end_time, 1.4);
    assert_outcome_invariants(&session, &outcome);
}

#[test]
fn test_match_withDelimiterOnlySegmentAndNoFreePunctuation_shouldDropIt() {
    // an empty key scores 0 against any non-empty window
    let words = vec![
        WordTimestamp::new("Really", 0.0, 0.5),
        WordTimestamp::new("?", 0.5, 0.6),
        WordTimestamp::new("Yes", 1.0, 1.3),
    ];
    let session = AlignmentSession::from_text("Really?! Yes", DelimiterSet::default(), words);
    let outcome = session.match_segments().unwrap();

    let texts: Vec<&str> = outcome.segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["Really?", "Yes"]);
    assert_eq!(outcome.dropped, vec![1]);
    assert_outcome_invariants(&session, &outcome);
}
