use std::sync::LazyLock;

use regex::Regex;

// Unicode White_Space plus U+FEFF, minus U+0085 (NEL), which browsers do
// not treat as whitespace when trimming or matching `\s`.
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[[\s\x{FEFF}]--\x{85}]+").expect("whitespace pattern is valid")
});

pub(crate) fn is_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{FEFF}'
}

/// Matching key for free text: trimmed, lowercased, inner whitespace runs
/// collapsed to one space. Missing input becomes the empty string.
pub fn normalize(input: Option<&str>) -> String {
    let Some(input) = input else {
        return String::new();
    };

    let lowered = input.trim_matches(is_space).to_lowercase();
    WHITESPACE_RUN.replace_all(&lowered, " ").into_owned()
}

pub fn normalize_str(input: &str) -> String {
    normalize(Some(input))
}
