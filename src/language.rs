//! Language detection for captured page text.

use whatlang::detect;

/// Detect the language of `text`.
///
/// Runs trigram-based detection over the raw page text and returns the ISO
/// 639-3 code (`"por"`, `"eng"`, ...) only when the detector reports the
/// result as reliable. Unreliable or impossible detection yields `None`,
/// which is a valid article state rather than an error.
///
/// # Arguments
///
/// * `text` - The text to classify
///
/// # Returns
///
/// The ISO 639-3 code of the detected language, or `None`.
pub fn detect_language(text: &str) -> Option<String> {
    let info = detect(text)?;
    if info.is_reliable() {
        Some(info.lang().code().to_string())
    } else {
        None
    }
}
