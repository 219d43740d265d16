use regex::Regex;
use std::sync::LazyLock;

/// Minimum length of an indexable word. Runs of word characters shorter
/// than this ("a", "I", "x") are dropped by [`tokenize`].
pub const MIN_WORD_LEN: usize = 2;

static WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\w{{{MIN_WORD_LEN},}}")).unwrap());

/// Split `text` into lowercased search words.
///
/// A word is a maximal run of word characters (alphanumeric or underscore)
/// of length at least [`MIN_WORD_LEN`]. The exact same rule normalizes both
/// the fields being indexed and incoming search strings, so a query word
/// always compares against postings produced the same way.
pub fn tokenize(text: &str) -> Vec<String> {
    WORD_REGEX.find_iter(text).map(|m| m.as_str().to_lowercase()).collect()
}
