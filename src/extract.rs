//! URL extraction from free-form message text.

use std::sync::LazyLock;

use regex::Regex;

/// Matches http/https/ftp URLs embedded in text. The final character class
/// excludes sentence punctuation so "check https://a.com/x." keeps the
/// trailing dot out of the match.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:http|ftp|https)://[\w-]+(?:\.[\w-]+)+(?:[\w.,@?^=%&:/~+#-]*[\w@?^=%&/~+#-])?")
        .expect("URL regex must compile")
});

/// All URL-like substrings of `text`, in order of appearance.
/// Duplicates are kept. Text without URLs yields an empty list.
pub fn find_urls(text: &str) -> Vec<String> {
    URL_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
