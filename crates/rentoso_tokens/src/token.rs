//! Token paths and template scanning.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{TokenError, TokenResult};

/// Matches `{{ path }}` placeholders, capturing the path.
pub(crate) static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([a-zA-Z0-9_.]+)\s*\}\}").expect("token pattern is valid")
});

/// Matches `[[path]]` unresolved markers, capturing the path.
pub(crate) static MARKER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([a-zA-Z0-9_.]+)\]\]").expect("marker pattern is valid")
});

/// A dotted placeholder path such as `propiedad.direccion`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token {
    path: String,
}

impl Token {
    /// Parse a token path, rejecting characters outside `[a-zA-Z0-9_.]`.
    pub fn parse(path: impl Into<String>) -> TokenResult<Self> {
        let path = path.into();
        if path.is_empty() || !path.chars().all(is_path_char) {
            return Err(TokenError::InvalidToken(path));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path segments in lookup order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('.')
    }

    /// The `{{path}}` form used in templates.
    pub fn placeholder(&self) -> String {
        format!("{{{{{}}}}}", self.path)
    }

    /// The `[[path]]` form left in rendered output when unresolved.
    pub fn marker(&self) -> String {
        marker(&self.path)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl std::str::FromStr for Token {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

pub(crate) fn is_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

pub(crate) fn marker(path: &str) -> String {
    format!("[[{}]]", path)
}

/// Collect the distinct token paths referenced by a template.
pub fn scan_tokens(template: &str) -> BTreeSet<String> {
    TOKEN_PATTERN
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}
