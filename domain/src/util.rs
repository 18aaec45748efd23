//! Shared utility functions.

/// Shorten a string for log lines and list rendering.
///
/// Keeps at most `max_bytes` of the input without splitting a UTF-8
/// character boundary, appending an ellipsis when anything was cut.
/// Strings that already fit are returned unchanged.
pub fn preview(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        return s.to_string();
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
