//! Detection of unresolved `[[path]]` markers in rendered text.

use std::collections::BTreeSet;

use regex::Captures;

use crate::token::MARKER_PATTERN;

/// CSS class applied by [`highlight_unresolved`] when none is given.
pub const DEFAULT_HIGHLIGHT_CLASS: &str = "empty-token";

/// Whether the text still contains at least one unresolved marker.
pub fn has_unresolved(text: &str) -> bool {
    MARKER_PATTERN.is_match(text)
}

/// The distinct paths of all unresolved markers in the text.
pub fn unresolved_paths(text: &str) -> BTreeSet<String> {
    MARKER_PATTERN
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Wrap each unresolved marker in a `<span>` with the given class.
///
/// The class is attribute-escaped before it is written.
pub fn highlight_unresolved(text: &str, class: &str) -> String {
    let class = escape_attribute(class);
    MARKER_PATTERN
        .replace_all(text, |caps: &Captures| {
            format!(r#"<span class="{}">{}</span>"#, class, &caps[0])
        })
        .into_owned()
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}
