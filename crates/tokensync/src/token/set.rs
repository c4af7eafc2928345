//! Token sets.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::Token;

/// An ordered, named collection of tokens.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenSet {
    pub name: String,
    pub tokens: Vec<Token>,
}

impl TokenSet {
    /// Creates an empty set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tokens: Vec::new(),
        }
    }

    /// Appends a token, returning the updated set for chaining.
    pub fn add(mut self, token: Token) -> Self {
        self.tokens.push(token);
        self
    }

    /// Finds a token by name.
    pub fn get(&self, name: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.name == name)
    }
}

/// All token sets known to a run, addressed by set name.
///
/// Deserializes from a map of set name to token list, keeping the map's
/// document order:
///
/// ```rust
/// use tokensync::TokenSets;
///
/// let sets: TokenSets = serde_json::from_str(r##"{
///     "global": [{ "name": "color.bg", "value": "#fff" }],
///     "dark":   [{ "name": "color.bg", "value": "#000" }]
/// }"##).unwrap();
///
/// assert_eq!(sets.names().collect::<Vec<_>>(), ["global", "dark"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenSets {
    sets: Vec<TokenSet>,
}

impl TokenSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a set, replacing any set with the same name in place.
    pub fn insert(&mut self, set: TokenSet) {
        match self.sets.iter_mut().find(|s| s.name == set.name) {
            Some(existing) => *existing = set,
            None => self.sets.push(set),
        }
    }

    /// Adds a set, returning the updated collection for chaining.
    pub fn with(mut self, set: TokenSet) -> Self {
        self.insert(set);
        self
    }

    pub fn get(&self, name: &str) -> Option<&TokenSet> {
        self.sets.iter().find(|s| s.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.iter().map(|s| s.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &TokenSet> {
        self.sets.iter()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl<'de> Deserialize<'de> for TokenSets {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SetsVisitor;

        impl<'de> Visitor<'de> for SetsVisitor {
            type Value = TokenSets;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of token set name to token list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<TokenSets, A::Error> {
                let mut sets = TokenSets::new();
                while let Some((name, tokens)) = map.next_entry::<String, Vec<Token>>()? {
                    sets.insert(TokenSet { name, tokens });
                }
                Ok(sets)
            }
        }

        deserializer.deserialize_map(SetsVisitor)
    }
}
