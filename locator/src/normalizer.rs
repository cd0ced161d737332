//! Collapses a caller supplied passage into canonical single-space words.

/// Normalize the passage and split it into words.
///
/// Line breaks (CRLF, LF, CR), tabs and whitespace runs all become a single
/// space before splitting, so `"a\r\n\tb"` and `"a b"` yield the same words.
pub fn normalize_words(input: &str) -> Vec<String> {
    let mut out = String::with_capacity(input.len());
    let mut prev_space = false;
    for c in input.chars() {
        if c.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(c);
            prev_space = false;
        }
    }
    out.trim()
        .split(' ')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalized passage as one string, words joined by single spaces.
pub fn normalize(input: &str) -> String {
    normalize_words(input).join(" ")
}
