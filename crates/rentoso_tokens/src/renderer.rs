//! Template rendering.

use std::collections::{BTreeSet, HashMap};

use regex::{Captures, Regex};
use serde_json::Value;
use tracing::debug;

use crate::context::{resolve_path, stringify, Context};
use crate::error::{TokenError, TokenResult};
use crate::token::{marker, Token, MARKER_PATTERN, TOKEN_PATTERN};

/// Outcome of rendering a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
    /// The rendered text.
    pub output: String,
    /// Paths that were substituted with a value.
    pub resolved: BTreeSet<String>,
    /// Paths left as `[[path]]` markers.
    pub unresolved: BTreeSet<String>,
}

impl RenderReport {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Renders `{{path}}` placeholders against a context.
pub struct TokenRenderer {
    token_pattern: Regex,
    marker_pattern: Regex,
}

impl Default for TokenRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenRenderer {
    /// Create a new token renderer.
    pub fn new() -> Self {
        Self {
            token_pattern: TOKEN_PATTERN.clone(),
            marker_pattern: MARKER_PATTERN.clone(),
        }
    }

    /// Render a template in a single pass.
    ///
    /// Substituted values are emitted verbatim and never scanned again, so a
    /// value containing `{{other}}` shows up literally in the output.
    pub fn render(&self, template: &str, context: &Value) -> String {
        self.render_report(template, context).output
    }

    /// Render a template and report which paths resolved.
    pub fn render_report(&self, template: &str, context: &Value) -> RenderReport {
        let mut resolved = BTreeSet::new();
        let mut unresolved = BTreeSet::new();

        let output = self
            .token_pattern
            .replace_all(template, |caps: &Captures| {
                let path = &caps[1];
                match resolve_path(path, context) {
                    Some(value) => {
                        resolved.insert(path.to_string());
                        stringify(value)
                    }
                    None => {
                        unresolved.insert(path.to_string());
                        marker(path)
                    }
                }
            })
            .into_owned();

        debug!(
            resolved = resolved.len(),
            unresolved = unresolved.len(),
            "Rendered template"
        );

        RenderReport {
            output,
            resolved,
            unresolved,
        }
    }

    /// Fill `[[path]]` markers with manually supplied values.
    ///
    /// Empty override values leave the marker untouched.
    pub fn apply_overrides(&self, rendered: &str, overrides: &HashMap<String, String>) -> String {
        if overrides.is_empty() {
            return rendered.to_string();
        }

        self.marker_pattern
            .replace_all(rendered, |caps: &Captures| {
                match overrides.get(&caps[1]) {
                    Some(value) if !value.is_empty() => value.clone(),
                    _ => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

/// Render a template against a context.
pub fn render(template: &str, context: &Context) -> String {
    TokenRenderer::new().render(template, context.as_value())
}

/// Fill unresolved markers from a map of manual values.
pub fn apply_overrides(rendered: &str, overrides: &HashMap<String, String>) -> String {
    TokenRenderer::new().apply_overrides(rendered, overrides)
}

/// Parse a `path=value` override pair.
pub fn parse_override(pair: &str) -> TokenResult<(String, String)> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| TokenError::InvalidOverride(pair.to_string()))?;
    let token = Token::parse(key.trim())
        .map_err(|_| TokenError::InvalidOverride(pair.to_string()))?;
    Ok((token.path().to_string(), value.to_string()))
}
