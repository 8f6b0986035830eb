use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A scalar property value read from a definition file.
///
/// Tokens `True`/`False` (any case) become `Bool`, all-digit tokens become
/// `Int`, everything else is kept as `Text` with surrounding quotes removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl PropertyValue {
    /// Coerces a raw scalar token into a typed value.
    pub fn coerce(token: &str) -> Self {
        if token.eq_ignore_ascii_case("true") {
            return Self::Bool(true);
        }
        if token.eq_ignore_ascii_case("false") {
            return Self::Bool(false);
        }
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = token.parse::<i64>() {
                return Self::Int(n);
            }
        }
        Self::Text(strip_quotes(token).to_string())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "'{s}'"),
        }
    }
}

fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    for quote in ['\'', '"'] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// The property bag attached to a component or to the form header.
///
/// Lookups are exact (case-sensitive) on the property key as written in the
/// source, e.g. `Caption` or `Items.Strings`. Accessors return `None` (or the
/// supplied default) both when the key is absent and when the stored value
/// has a different variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyBag(BTreeMap<String, PropertyValue>);

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a property. A repeated key keeps the last value, matching
    /// how the legacy loader applies properties in order.
    pub fn insert(&mut self, key: impl Into<String>, value: PropertyValue) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the boolean stored under `key`, or `default` when absent or
    /// not a boolean.
    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(PropertyValue::as_bool).unwrap_or(default)
    }

    /// True only when the property is present and explicitly `False`.
    pub fn is_explicitly_false(&self, key: &str) -> bool {
        self.get(key).and_then(PropertyValue::as_bool) == Some(false)
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(PropertyValue::as_int)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropertyValue::as_text)
    }

    /// Returns the first non-empty text value among `keys`, in order.
    pub fn first_text(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|k| self.text(k))
            .map(str::trim)
            .find(|s| !s.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}
