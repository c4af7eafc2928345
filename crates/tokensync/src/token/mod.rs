//! Token model: named, typed style values.
//!
//! This module provides:
//!
//! - [`Token`]: a named value with a [`TokenType`] and optional description
//! - [`TokenValue`]: the raw value, classified into scalar, composite, alias,
//!   or template once at construction
//! - [`TokenSet`] / [`TokenSets`]: ordered, named groups of tokens
//!
//! Tokens address each other by dotted name (`color.brand.primary`). A token
//! whose value references another token is resolved by [`crate::alias`].

mod kind;
mod set;
mod value;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use kind::TokenType;
pub use set::{TokenSet, TokenSets};
pub use value::{MalformedTokenError, Segment, TokenValue};

pub(crate) use value::format_number;

/// A named style value.
///
/// # Example
///
/// ```rust
/// use tokensync::{Token, TokenType, TokenValue};
///
/// let bg = Token::new("color.bg", "#ffffff");
/// let fg = Token::new("color.fg", "{color.bg}").with_description("Foreground");
///
/// assert_eq!(bg.token_type, TokenType::Color);
/// assert!(matches!(fg.raw, TokenValue::Alias(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawToken")]
pub struct Token {
    /// Dotted name, unique within a set.
    pub name: String,
    /// The value as authored, possibly referencing other tokens.
    #[serde(rename = "value")]
    pub raw: TokenValue,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Set when the authored value had no token interpretation and `raw`
    /// holds its JSON text instead.
    #[serde(skip)]
    pub malformed: Option<MalformedTokenError>,
}

impl Token {
    /// Creates a token, inferring its type from the name.
    pub fn new(name: impl Into<String>, raw: impl Into<TokenValue>) -> Self {
        let name = name.into();
        Self {
            token_type: TokenType::infer_from_name(&name),
            name,
            raw: raw.into(),
            description: None,
            malformed: None,
        }
    }

    /// Creates a token from an authored JSON value.
    ///
    /// Values that cannot be interpreted are kept as text literals and
    /// flagged in [`Token::malformed`].
    pub fn from_json(name: impl Into<String>, value: &Value) -> Self {
        let (raw, malformed) = TokenValue::from_json_lossy(value);
        Self {
            malformed,
            ..Self::new(name, raw)
        }
    }

    /// Sets an explicit type, returning the updated token for chaining.
    pub fn with_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }

    /// Sets a description, returning the updated token for chaining.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Authored token shape: `{ name, value, type?, description? }`.
#[derive(Deserialize)]
struct RawToken {
    name: String,
    value: Value,
    #[serde(rename = "type", default)]
    token_type: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl From<RawToken> for Token {
    fn from(raw: RawToken) -> Self {
        let mut token = Token::from_json(raw.name, &raw.value);
        if let Some(token_type) = raw.token_type.as_deref().and_then(parse_type) {
            token.token_type = token_type;
        }
        token.description = raw.description;
        token
    }
}

/// Empty and `"undefined"` types count as absent.
fn parse_type(name: &str) -> Option<TokenType> {
    if name.is_empty() || name == "undefined" {
        return None;
    }
    serde_json::from_value(Value::String(name.to_string())).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_new_infers_type() {
        let token = Token::new("spacing.lg", 8);
        assert_eq!(token.token_type, TokenType::Spacing);
        assert_eq!(token.raw, TokenValue::Number(8.0));
    }

    #[test]
    fn test_token_deserialize_explicit_type() {
        let token: Token = serde_json::from_value(json!({
            "name": "brand.primary",
            "value": "#ff0000",
            "type": "color",
            "description": "Brand"
        }))
        .unwrap();

        assert_eq!(token.token_type, TokenType::Color);
        assert_eq!(token.description.as_deref(), Some("Brand"));
        assert!(token.malformed.is_none());
    }

    #[test]
    fn test_token_deserialize_empty_type_is_inferred() {
        let token: Token = serde_json::from_value(json!({
            "name": "fontSizes.body",
            "value": 16,
            "type": ""
        }))
        .unwrap();
        assert_eq!(token.token_type, TokenType::FontSizes);
    }

    #[test]
    fn test_token_deserialize_malformed_value() {
        let token: Token = serde_json::from_value(json!({
            "name": "color.broken",
            "value": null
        }))
        .unwrap();

        assert_eq!(token.raw, TokenValue::Text("null".into()));
        assert!(token.malformed.is_some());
    }

    #[test]
    fn test_token_serialize_restores_authored_shape() {
        let token = Token::new("color.fg", "{color.bg}").with_type(TokenType::Color);
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(
            json,
            json!({ "name": "color.fg", "value": "{color.bg}", "type": "color" })
        );
    }
}
