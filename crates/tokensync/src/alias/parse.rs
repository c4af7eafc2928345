//! Alias syntax.
//!
//! Two reference forms are recognized anywhere in a string value:
//!
//! - `{color.brand.primary}`: braces around a dotted path
//! - `$color.brand.primary`: a dollar sigil followed by a dotted path
//!
//! A string that is exactly one reference is an alias; a string with
//! references among other text is a template.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::token::{Segment, TokenValue};

static REFERENCE: Lazy<Regex> = Lazy::new(|| {
    const PATH: &str = r"[A-Za-z0-9_\-]+(?:\.[A-Za-z0-9_\-]+)*";
    Regex::new(&format!(r"\{{\s*({PATH})\s*\}}|\$({PATH})"))
        .expect("reference pattern is valid")
});

/// A dotted path into the token graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasPath(String);

impl AliasPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The path split on `.`.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

impl fmt::Display for AliasPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Classifies a string value as text, alias, or template.
pub(crate) fn classify_str(raw: &str) -> TokenValue {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in REFERENCE.captures_iter(raw) {
        let (Some(whole), Some(path)) = (caps.get(0), caps.get(1).or_else(|| caps.get(2))) else {
            continue;
        };
        if whole.start() > last {
            segments.push(Segment::Literal(raw[last..whole.start()].to_string()));
        }
        segments.push(Segment::Reference(AliasPath::new(path.as_str())));
        last = whole.end();
    }

    if segments.is_empty() {
        return TokenValue::Text(raw.to_string());
    }
    if last < raw.len() {
        segments.push(Segment::Literal(raw[last..].to_string()));
    }

    let mut references = segments.iter().filter_map(|s| match s {
        Segment::Reference(path) => Some(path),
        Segment::Literal(_) => None,
    });
    let only_reference = match (references.next(), references.next()) {
        (Some(path), None) => Some(path.clone()),
        _ => None,
    };
    let padding_only = segments.iter().all(|s| match s {
        Segment::Literal(text) => text.trim().is_empty(),
        Segment::Reference(_) => true,
    });

    match only_reference {
        Some(path) if padding_only => TokenValue::Alias(path),
        _ => TokenValue::Template(segments),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(path: &str) -> Segment {
        Segment::Reference(AliasPath::new(path))
    }

    fn literal(text: &str) -> Segment {
        Segment::Literal(text.to_string())
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(classify_str("#ffffff"), TokenValue::Text("#ffffff".into()));
        assert_eq!(classify_str(""), TokenValue::Text(String::new()));
    }

    #[test]
    fn test_whole_value_alias() {
        assert_eq!(
            classify_str("{spacing.sm}"),
            TokenValue::Alias(AliasPath::new("spacing.sm"))
        );
        assert_eq!(
            classify_str("$spacing.sm"),
            TokenValue::Alias(AliasPath::new("spacing.sm"))
        );
        assert_eq!(
            classify_str("  { spacing.sm } "),
            TokenValue::Alias(AliasPath::new("spacing.sm"))
        );
    }

    #[test]
    fn test_embedded_alias_is_template() {
        assert_eq!(
            classify_str("{spacing.sm}px"),
            TokenValue::Template(vec![reference("spacing.sm"), literal("px")])
        );
        assert_eq!(
            classify_str("$a.b $c"),
            TokenValue::Template(vec![reference("a.b"), literal(" "), reference("c")])
        );
    }

    #[test]
    fn test_trailing_dot_is_not_part_of_path() {
        assert_eq!(
            classify_str("see $a.b."),
            TokenValue::Template(vec![literal("see "), reference("a.b"), literal(".")])
        );
    }

    #[test]
    fn test_empty_braces_are_text() {
        assert_eq!(classify_str("{ }"), TokenValue::Text("{ }".into()));
    }

    #[test]
    fn test_braces_around_prose_are_text() {
        assert_eq!(classify_str("a { b c }"), TokenValue::Text("a { b c }".into()));
        assert_eq!(
            classify_str("{x:1} {spacing.sm}"),
            TokenValue::Template(vec![literal("{x:1} "), reference("spacing.sm")])
        );
    }

    #[test]
    fn test_segments() {
        let path = AliasPath::new("typography.body.fontSize");
        assert_eq!(
            path.segments().collect::<Vec<_>>(),
            ["typography", "body", "fontSize"]
        );
    }
}
