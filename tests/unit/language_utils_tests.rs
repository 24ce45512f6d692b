/*!
 * Tests for language identifier resolution
 */

use textsync::language_utils::{aligner_language_name, get_language_name, language_from_code};

#[test]
fn test_alignerLanguageName_withCommonCodes_shouldReturnEnglishNames() {
    let cases = [
        ("ja", "Japanese"),
        ("en", "English"),
        ("zh", "Chinese"),
        ("fr", "French"),
        ("fre", "French"),
        ("kor", "Korean"),
    ];
    for (code, name) in cases {
        assert_eq!(aligner_language_name(code), name, "code {}", code);
    }
}

#[test]
fn test_alignerLanguageName_withFreeFormName_shouldPassThrough() {
    assert_eq!(aligner_language_name("Japanese"), "Japanese");
    assert_eq!(aligner_language_name("Mandarin Chinese"), "Mandarin Chinese");
}

#[test]
fn test_languageFromCode_shouldIgnoreCaseAndWhitespace() {
    assert!(language_from_code(" JA ").is_some());
    assert!(language_from_code("xx").is_none());
    assert!(get_language_name("Japanese").is_err());
}
