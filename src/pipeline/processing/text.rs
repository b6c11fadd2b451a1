/// Cleans free text for insertion: drops NUL bytes, trims surrounding
/// whitespace and caps the length at `max_len` characters.
pub fn sanitize(text: Option<&str>, max_len: usize) -> String {
    let Some(text) = text else {
        return String::new();
    };
    let cleaned = text.replace('\0', "");
    truncate_chars(cleaned.trim(), max_len).to_string()
}

/// Longest prefix of `text` holding at most `max_len` characters.
pub fn truncate_chars(text: &str, max_len: usize) -> &str {
    match text.char_indices().nth(max_len) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
