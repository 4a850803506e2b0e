//! Markdown built from dialog input.

/// Build `[text](url)` for the insert-link dialog.
///
/// Brackets and backslashes in the text are escaped. A URL containing spaces
/// or parentheses is wrapped in angle brackets so the destination survives
/// parsing. Blank text falls back to the URL itself.
pub fn link_snippet(text: &str, url: &str) -> String {
    let url = url.trim();
    let text = if text.trim().is_empty() { url } else { text };

    let mut label = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '[' | ']' | '\\') {
            label.push('\\');
        }
        label.push(ch);
    }

    let needs_angle = url.chars().any(|c| c.is_whitespace() || c == '(' || c == ')');
    if needs_angle {
        let url = url.replace('<', "%3C").replace('>', "%3E");
        format!("[{}](<{}>)", label, url)
    } else {
        format!("[{}]({})", label, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_snippet_plain() {
        assert_eq!(link_snippet("Docs", "https://example.com"), "[Docs](https://example.com)");
    }

    #[test]
    fn test_link_snippet_escapes_text() {
        assert_eq!(link_snippet("a [b] c", "x.html"), r"[a \[b\] c](x.html)");
    }

    #[test]
    fn test_link_snippet_wraps_awkward_urls() {
        assert_eq!(link_snippet("Wiki", "https://en.wikipedia.org/wiki/Rust_(language)"),
            "[Wiki](<https://en.wikipedia.org/wiki/Rust_(language)>)");
        assert_eq!(link_snippet("File", " my file.md "), "[File](<my file.md>)");
    }

    #[test]
    fn test_link_snippet_blank_text_uses_url() {
        assert_eq!(link_snippet("  ", "example.com"), "[example.com](example.com)");
    }
}
