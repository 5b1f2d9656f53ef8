//! Marker-anchored field extraction from model replies.
//!
//! This is a single forward scan, not a parser. Only the first occurrence of a
//! marker counts. Markers that appear inside the classified text itself can
//! shift the anchor.

/// Terminator used when none is given
pub const DEFAULT_TERMINATOR: &str = "\n";

/// Extract the field after `marker`, up to the end of its line.
pub fn extract_section(completion: &str, marker: &str) -> Option<String> {
    extract_section_until(completion, marker, DEFAULT_TERMINATOR)
}

/// Extract the text between the first `marker` and the next `terminator` after it.
///
/// Returns `None` when the marker is missing. Without a following terminator the
/// rest of the text is returned. The result is trimmed.
pub fn extract_section_until(completion: &str, marker: &str, terminator: &str) -> Option<String> {
    let start = completion.find(marker)? + marker.len();
    let rest = &completion[start..];
    let section = match rest.find(terminator) {
        Some(end) => &rest[..end],
        None => rest,
    };
    Some(section.trim().to_string())
}
