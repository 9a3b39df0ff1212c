//! String utilities for the domain layer.

/// Escape text for insertion into HTML markup.
///
/// Covers the five characters that can open a tag, an entity or an
/// attribute value: `&`, `<`, `>`, `"` and `'`.
pub fn escape_html(unsafe_text: &str) -> String {
    let mut escaped = String::with_capacity(unsafe_text.len());
    for ch in unsafe_text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Strip control characters so text cannot drive the terminal.
///
/// Newlines and tabs survive; every other control character (including
/// the ESC that starts ANSI sequences) is replaced with U+FFFD.
pub fn sanitize_terminal(text: &str) -> String {
    text.chars()
        .map(|ch| {
            if ch.is_control() && ch != '\n' && ch != '\t' {
                '\u{FFFD}'
            } else {
                ch
            }
        })
        .collect()
}

/// Shorten text to at most `max_chars` characters for log previews.
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}
