//! Raw token values.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::alias::parse::classify_str;
use crate::alias::AliasPath;

/// Error recorded when a raw JSON value has no token interpretation.
///
/// The token is still usable: its value falls back to an opaque text literal
/// holding the original JSON.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[error("value {value} is not a scalar, composite, or alias")]
pub struct MalformedTokenError {
    /// The offending value, as JSON text.
    pub value: String,
}

/// One piece of a [`TokenValue::Template`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text copied as-is.
    Literal(String),
    /// A reference replaced by the target's value, coerced to text.
    Reference(AliasPath),
}

/// The raw value of a token, classified once when the token is built.
///
/// Strings are probed for alias sigils exactly once, in
/// [`TokenValue::from_json`] or the `From<&str>` conversion:
///
/// - `"#fff"` becomes [`TokenValue::Text`]
/// - `"{color.bg}"` or `"$color.bg"` becomes [`TokenValue::Alias`]
/// - `"{spacing.sm}px"` becomes [`TokenValue::Template`]
///
/// Objects become [`TokenValue::Composite`], with each field classified
/// by the same rules.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Number(f64),
    Text(String),
    Bool(bool),
    Composite(BTreeMap<String, TokenValue>),
    /// The whole value is one reference.
    Alias(AliasPath),
    /// References embedded among literal text.
    Template(Vec<Segment>),
}

impl TokenValue {
    /// Classifies a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedTokenError`] for `null` and arrays, anywhere in the
    /// value. Callers that want the literal fallback use
    /// [`TokenValue::from_json_lossy`].
    pub fn from_json(value: &Value) -> Result<Self, MalformedTokenError> {
        match value {
            Value::Number(n) => n
                .as_f64()
                .map(TokenValue::Number)
                .ok_or_else(|| MalformedTokenError {
                    value: n.to_string(),
                }),
            Value::String(s) => Ok(classify_str(s)),
            Value::Bool(b) => Ok(TokenValue::Bool(*b)),
            Value::Object(fields) => fields
                .iter()
                .map(|(key, field)| Ok((key.clone(), Self::from_json(field)?)))
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(TokenValue::Composite),
            Value::Null | Value::Array(_) => Err(MalformedTokenError {
                value: value.to_string(),
            }),
        }
    }

    /// Classifies a JSON value, falling back to an opaque text literal.
    pub fn from_json_lossy(value: &Value) -> (Self, Option<MalformedTokenError>) {
        match Self::from_json(value) {
            Ok(parsed) => (parsed, None),
            Err(err) => (TokenValue::Text(value.to_string()), Some(err)),
        }
    }

    /// Returns true if this value, or any field of it, references another token.
    pub fn has_references(&self) -> bool {
        match self {
            TokenValue::Alias(_) | TokenValue::Template(_) => true,
            TokenValue::Composite(fields) => fields.values().any(TokenValue::has_references),
            TokenValue::Number(_) | TokenValue::Text(_) | TokenValue::Bool(_) => false,
        }
    }

    /// Converts back to the JSON shape the value was read from.
    pub fn to_json(&self) -> Value {
        match self {
            TokenValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            TokenValue::Text(s) => Value::String(s.clone()),
            TokenValue::Bool(b) => Value::Bool(*b),
            TokenValue::Composite(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, field)| (key.clone(), field.to_json()))
                    .collect(),
            ),
            TokenValue::Alias(path) => Value::String(format!("{{{}}}", path)),
            TokenValue::Template(segments) => {
                let mut text = String::new();
                for segment in segments {
                    match segment {
                        Segment::Literal(s) => text.push_str(s),
                        Segment::Reference(path) => {
                            text.push('{');
                            text.push_str(path.as_str());
                            text.push('}');
                        }
                    }
                }
                Value::String(text)
            }
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_json() {
            Value::String(s) => f.write_str(&s),
            other => write!(f, "{}", other),
        }
    }
}

impl Serialize for TokenValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<&str> for TokenValue {
    fn from(s: &str) -> Self {
        classify_str(s)
    }
}

impl From<String> for TokenValue {
    fn from(s: String) -> Self {
        classify_str(&s)
    }
}

impl From<f64> for TokenValue {
    fn from(n: f64) -> Self {
        TokenValue::Number(n)
    }
}

impl From<i32> for TokenValue {
    fn from(n: i32) -> Self {
        TokenValue::Number(f64::from(n))
    }
}

impl From<bool> for TokenValue {
    fn from(b: bool) -> Self {
        TokenValue::Bool(b)
    }
}

/// Formats a number the way token values are written: integral values
/// without a fractional part.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
