use anyhow::{anyhow, Result};
use isolang::Language;

/// Language utilities for the alignment source
///
/// Aligner models expect English language names ("Japanese", "English").
/// Users may also give ISO 639-1 (2-letter) or ISO 639-2 (3-letter) codes,
/// which are resolved to names here.

/// Map an ISO 639-2/B code to its ISO 639-2/T form
fn bibliographic_to_terminology(code: &str) -> Option<&'static str> {
    let part2t = match code {
        "fre" => "fra",
        "ger" => "deu",
        "dut" => "nld",
        "gre" => "ell",
        "chi" => "zho",
        "cze" => "ces",
        "ice" => "isl",
        "alb" => "sqi",
        "arm" => "hye",
        "baq" => "eus",
        "bur" => "mya",
        "per" => "fas",
        "geo" => "kat",
        "may" => "msa",
        "mac" => "mkd",
        "rum" => "ron",
        "slo" => "slk",
        "wel" => "cym",
        _ => return None,
    };
    Some(part2t)
}

/// Look up an ISO 639-1 or ISO 639-2 code
pub fn language_from_code(code: &str) -> Option<Language> {
    let normalized_code = code.trim().to_lowercase();

    match normalized_code.len() {
        2 => Language::from_639_1(&normalized_code),
        3 => {
            let part2t = bibliographic_to_terminology(&normalized_code).unwrap_or(&normalized_code);
            Language::from_639_3(part2t)
        }
        _ => None,
    }
}

/// Get the English language name for an ISO code
pub fn get_language_name(code: &str) -> Result<String> {
    language_from_code(code)
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Language identifier handed to the alignment source
///
/// Codes become English names, anything else passes through trimmed.
pub fn aligner_language_name(language: &str) -> String {
    match get_language_name(language) {
        Ok(name) => name,
        Err(_) => language.trim().to_string(),
    }
}
