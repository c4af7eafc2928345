//! The token graph: every token of a resolution pass, keyed by dotted name.
//!
//! A [`TokenGraph`] is built by flattening token sets in precedence order.
//! When two sets define the same name the later one wins, but the name keeps
//! the position where it first appeared, so iteration order is stable across
//! overrides.
//!
//! Names are indexed in a [`PathTree`], which lets the resolver find the
//! longest token prefix of a reference path (`typography.body.fontSize`
//! addresses the `fontSize` field of the `typography.body` token).

pub mod tree;

use crate::alias::AliasPath;
use crate::token::{Token, TokenSet};

pub use tree::PathTree;

/// Read-only view of all tokens visible to one resolution pass.
#[derive(Debug, Clone, Default)]
pub struct TokenGraph {
    tokens: Vec<Token>,
    tree: PathTree,
}

impl TokenGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flattens sets in order; later sets override earlier ones.
    pub fn from_sets<'a>(sets: impl IntoIterator<Item = &'a TokenSet>) -> Self {
        let mut graph = Self::new();
        for set in sets {
            graph.extend(set.tokens.iter().cloned());
        }
        graph
    }

    /// Builds a graph from tokens in order; later tokens override earlier ones.
    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> Self {
        let mut graph = Self::new();
        graph.extend(tokens);
        graph
    }

    /// Adds a token, replacing any token with the same name in place.
    pub fn insert(&mut self, token: Token) {
        match self.tree.get(token.name.split('.')) {
            Some(slot) => self.tokens[slot] = token,
            None => {
                self.tree.insert(token.name.split('.'), self.tokens.len());
                self.tokens.push(token);
            }
        }
    }

    pub fn extend(&mut self, tokens: impl IntoIterator<Item = Token>) {
        for token in tokens {
            self.insert(token);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Token> {
        self.tree.get(name.split('.')).map(|slot| &self.tokens[slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Finds the token a reference path points at.
    ///
    /// Returns the token whose name is the longest prefix of `path`, plus the
    /// remaining segments, which address fields inside that token's value.
    pub fn lookup<'p>(&self, path: &'p AliasPath) -> Option<(&Token, Vec<&'p str>)> {
        let segments: Vec<&str> = path.segments().collect();
        let (slot, consumed) = self.tree.longest_prefix(&segments)?;
        Some((&self.tokens[slot], segments[consumed..].to_vec()))
    }

    /// Tokens whose names start with the `prefix` group, in name order.
    ///
    /// ```rust
    /// use tokensync::{Token, TokenGraph};
    ///
    /// let graph = TokenGraph::from_tokens([
    ///     Token::new("color.bg", "#fff"),
    ///     Token::new("spacing.sm", 4),
    ///     Token::new("color.fg", "#000"),
    /// ]);
    ///
    /// let names: Vec<_> = graph.group("color").iter().map(|t| t.name.as_str()).collect();
    /// assert_eq!(names, ["color.bg", "color.fg"]);
    /// ```
    pub fn group(&self, prefix: &str) -> Vec<&Token> {
        let node = if prefix.is_empty() {
            self.tree.find(std::iter::empty::<&str>())
        } else {
            self.tree.find(prefix.split('.'))
        };
        node.map(|node| {
            self.tree
                .descendants(node)
                .into_iter()
                .map(|slot| &self.tokens[slot])
                .collect()
        })
        .unwrap_or_default()
    }

    /// Iterates tokens in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<'a> IntoIterator for &'a TokenGraph {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
