/*!
 * Tests for transcript input resolution
 */

use anyhow::Result;
use textsync::text_input::TextInput;

use crate::common;

#[test]
fn test_detect_withTranscriptFile_shouldReadFileContents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "text.txt", "Hello. World!\n")?;

    let input = TextInput::detect(&path.to_string_lossy());
    assert_eq!(input, TextInput::FileReference(path));
    assert_eq!(input.resolve()?, "Hello. World!\n");
    Ok(())
}

#[test]
fn test_detect_withDirectoryPath_shouldTreatAsText() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let arg = temp_dir.path().to_string_lossy().to_string();

    let input = TextInput::detect(&arg);
    assert_eq!(input, TextInput::InlineText(arg));
    Ok(())
}

#[test]
fn test_detect_withEmptyArgument_shouldBeEmptyText() {
    let input = TextInput::detect("");
    assert_eq!(input.resolve().unwrap(), "");
}
