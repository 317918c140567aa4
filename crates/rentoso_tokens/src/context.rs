//! Render context and dotted path resolution.
//!
//! A context is a tree of JSON-like values. Paths are resolved one segment at
//! a time; resolution stops with "missing" at the first absent key, `null`, or
//! scalar intermediate. Falsy values such as `0`, `false` and `""` count as
//! found.

use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{TokenError, TokenResult};

/// Nested data supplying values for token paths.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Context(Value);

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Set a top-level key.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if let Value::Object(map) = &mut self.0 {
            map.insert(key.into(), value.into());
        }
        self
    }

    /// Set a value at a dotted path, creating intermediate objects.
    ///
    /// Fails if an intermediate segment already holds a non-object value.
    pub fn insert_path(&mut self, path: &str, value: impl Into<Value>) -> TokenResult<()> {
        if path.is_empty() {
            return Err(TokenError::InvalidContext("empty path".to_string()));
        }

        let (parents, leaf) = match path.rsplit_once('.') {
            Some((parents, leaf)) => (Some(parents), leaf),
            None => (None, path),
        };

        let mut current = &mut self.0;
        for segment in parents.into_iter().flat_map(|p| p.split('.')) {
            current = match current {
                Value::Object(map) => map
                    .entry(segment.to_string())
                    .or_insert_with(|| Value::Object(Map::new())),
                _ => {
                    return Err(TokenError::InvalidContext(format!(
                        "cannot set {path:?}: segment before {segment:?} is not an object"
                    )))
                }
            };
        }

        match current {
            Value::Object(map) => {
                map.insert(leaf.to_string(), value.into());
                Ok(())
            }
            _ => Err(TokenError::InvalidContext(format!(
                "cannot set {path:?}: segment before {leaf:?} is not an object"
            ))),
        }
    }

    /// Resolve a dotted path against this context.
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        resolve_path(path, &self.0)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Parse a context document. YAML is accepted as a superset of JSON.
    pub fn from_yaml_str(content: &str) -> TokenResult<Self> {
        let value: Value = serde_yaml::from_str(content)?;
        Self::try_from(value)
    }

    pub fn from_json_str(content: &str) -> TokenResult<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::try_from(value)
    }

    /// Parse context content, picking the format from the file extension.
    pub fn parse(content: &str, path: &Path) -> TokenResult<Self> {
        if is_yaml_path(path) {
            Self::from_yaml_str(content)
        } else {
            Self::from_json_str(content)
        }
    }

    /// Load a context file, picking the format from its extension.
    pub fn load(path: &Path) -> TokenResult<Self> {
        let content = std::fs::read_to_string(path)?;
        debug!("Loading context from {:?}", path);
        Self::parse(&content, path)
    }
}

impl TryFrom<Value> for Context {
    type Error = TokenError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(_) => Ok(Self(value)),
            Value::Null => Ok(Self::new()),
            other => Err(TokenError::InvalidContext(format!(
                "expected a mapping at the top level, found {}",
                kind(&other)
            ))),
        }
    }
}

/// Whether a path names a YAML file by extension.
pub fn is_yaml_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

/// Resolve a dotted path, returning `None` when any segment is missing.
pub fn resolve_path<'a>(path: &str, context: &'a Value) -> Option<&'a Value> {
    let mut current = context;

    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    match current {
        Value::Null => None,
        found => Some(found),
    }
}

/// Render a resolved value as it appears in output.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                let f = n.as_f64().unwrap_or_default();
                // Integral floats print without a trailing ".0".
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    (f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
        }
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}
