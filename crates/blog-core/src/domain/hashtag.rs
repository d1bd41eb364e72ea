//! Hashtag extraction from post content.

/// Extract hashtag names from `content`.
///
/// Content is split on whitespace and every token starting with `#` yields
/// the rest of the token after that one `#`. Names are taken verbatim: no
/// case folding, no punctuation stripping (`#tag,` yields `tag,`, `##b`
/// yields `#b`). A token made only of `#` characters yields the empty name.
/// Duplicates are kept in order of appearance.
pub fn extract_hashtags(content: &str) -> Vec<&str> {
    content
        .split_whitespace()
        .filter_map(|token| token.strip_prefix('#'))
        .map(|rest| if rest.bytes().all(|b| b == b'#') { "" } else { rest })
        .collect()
}
