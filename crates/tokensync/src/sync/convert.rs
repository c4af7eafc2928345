//! Token to variable conversion.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::alias::ResolvedValue;
use crate::store::{parse_color, VariableKind, VariableValue};
use crate::token::{MalformedTokenError, TokenType};

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)")
        .expect("number pattern is valid")
});

/// The variable kind a token type materializes as.
///
/// Composite types and `other` have no variable representation.
pub fn variable_kind(token_type: TokenType) -> Option<VariableKind> {
    match token_type {
        TokenType::Color => Some(VariableKind::Color),
        TokenType::Sizing
        | TokenType::Spacing
        | TokenType::BorderRadius
        | TokenType::BorderWidth
        | TokenType::Opacity
        | TokenType::FontSizes
        | TokenType::LineHeights
        | TokenType::LetterSpacing
        | TokenType::ParagraphSpacing
        | TokenType::Dimension
        | TokenType::Number => Some(VariableKind::Float),
        TokenType::FontFamilies | TokenType::FontWeights | TokenType::Text => {
            Some(VariableKind::String)
        }
        TokenType::Boolean => Some(VariableKind::Boolean),
        TokenType::Typography | TokenType::BoxShadow | TokenType::Border | TokenType::Other => {
            None
        }
    }
}

/// The variable name for a token: dotted groups become slash groups.
pub fn variable_name(token_name: &str) -> String {
    token_name.replace('.', "/")
}

/// Converts a resolved value into a variable value of the given kind.
///
/// # Errors
///
/// Returns [`MalformedTokenError`] when the value has no reading as `kind`,
/// such as an unparsable color or a composite for a float variable.
pub fn to_variable_value(
    kind: VariableKind,
    value: &ResolvedValue,
) -> Result<VariableValue, MalformedTokenError> {
    let malformed = || MalformedTokenError {
        value: value.to_json().to_string(),
    };
    match (kind, value) {
        (VariableKind::Color, ResolvedValue::Text(text)) => {
            parse_color(text).map(VariableValue::Color).ok_or_else(malformed)
        }
        (VariableKind::Float, ResolvedValue::Number(n)) => Ok(VariableValue::Float(*n)),
        (VariableKind::Float, ResolvedValue::Text(text)) => leading_number(text)
            .map(VariableValue::Float)
            .ok_or_else(malformed),
        (VariableKind::String, ResolvedValue::Composite(_)) => Err(malformed()),
        (VariableKind::String, other) => Ok(VariableValue::String(other.to_text())),
        (VariableKind::Boolean, ResolvedValue::Bool(b)) => Ok(VariableValue::Boolean(*b)),
        (VariableKind::Boolean, ResolvedValue::Text(text)) => match text.trim() {
            "true" => Ok(VariableValue::Boolean(true)),
            "false" => Ok(VariableValue::Boolean(false)),
            _ => Err(malformed()),
        },
        _ => Err(malformed()),
    }
}

/// Reads the number at the start of a dimension such as `"16px"` or `"1.5rem"`.
fn leading_number(text: &str) -> Option<f64> {
    LEADING_NUMBER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Rgba;

    fn text(s: &str) -> ResolvedValue {
        ResolvedValue::Text(s.to_string())
    }

    #[test]
    fn test_variable_kind_mapping() {
        assert_eq!(variable_kind(TokenType::Color), Some(VariableKind::Color));
        assert_eq!(variable_kind(TokenType::Spacing), Some(VariableKind::Float));
        assert_eq!(
            variable_kind(TokenType::FontFamilies),
            Some(VariableKind::String)
        );
        assert_eq!(variable_kind(TokenType::Boolean), Some(VariableKind::Boolean));
        assert_eq!(variable_kind(TokenType::Typography), None);
        assert_eq!(variable_kind(TokenType::Other), None);
    }

    #[test]
    fn test_variable_name() {
        assert_eq!(variable_name("color.brand.primary"), "color/brand/primary");
        assert_eq!(variable_name("flat"), "flat");
    }

    #[test]
    fn test_float_from_dimension_text() {
        let convert = |s: &str| to_variable_value(VariableKind::Float, &text(s));
        assert_eq!(convert("16px"), Ok(VariableValue::Float(16.0)));
        assert_eq!(convert("1.5rem"), Ok(VariableValue::Float(1.5)));
        assert_eq!(convert("-.5"), Ok(VariableValue::Float(-0.5)));
        assert!(convert("auto").is_err());
    }

    #[test]
    fn test_float_from_number() {
        assert_eq!(
            to_variable_value(VariableKind::Float, &ResolvedValue::Number(8.0)),
            Ok(VariableValue::Float(8.0))
        );
    }

    #[test]
    fn test_color_conversion() {
        assert_eq!(
            to_variable_value(VariableKind::Color, &text("#ffffff")),
            Ok(VariableValue::Color(Rgba::new(1.0, 1.0, 1.0, 1.0)))
        );
        let err = to_variable_value(VariableKind::Color, &text("not-a-color")).unwrap_err();
        assert!(err.value.contains("not-a-color"));
    }

    #[test]
    fn test_string_conversion_coerces_scalars() {
        assert_eq!(
            to_variable_value(VariableKind::String, &ResolvedValue::Number(700.0)),
            Ok(VariableValue::String("700".into()))
        );
        assert!(to_variable_value(
            VariableKind::String,
            &ResolvedValue::Composite(Default::default())
        )
        .is_err());
    }

    #[test]
    fn test_boolean_conversion() {
        assert_eq!(
            to_variable_value(VariableKind::Boolean, &text("true")),
            Ok(VariableValue::Boolean(true))
        );
        assert!(to_variable_value(VariableKind::Boolean, &ResolvedValue::Number(1.0)).is_err());
    }
}
