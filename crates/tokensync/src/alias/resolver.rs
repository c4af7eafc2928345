//! Recursive alias resolution over a [`TokenGraph`].

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

use super::{AliasError, AliasPath};
use crate::graph::TokenGraph;
use crate::token::{format_number, Segment, Token, TokenValue};

/// A token value with every reference replaced.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    Number(f64),
    Text(String),
    Bool(bool),
    Composite(BTreeMap<String, ResolvedValue>),
}

impl ResolvedValue {
    /// Coerces the value to text, as done for references inside templates.
    ///
    /// Integral numbers print without a fractional part, also inside
    /// composites, which print as compact JSON.
    pub fn to_text(&self) -> String {
        match self {
            ResolvedValue::Number(n) => format_number(*n),
            ResolvedValue::Text(s) => s.clone(),
            ResolvedValue::Bool(b) => b.to_string(),
            ResolvedValue::Composite(_) => self.to_text_json().to_string(),
        }
    }

    fn to_text_json(&self) -> Value {
        match self {
            ResolvedValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                Value::from(*n as i64)
            }
            ResolvedValue::Composite(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, field)| (key.clone(), field.to_text_json()))
                    .collect(),
            ),
            other => other.to_json(),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ResolvedValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            ResolvedValue::Text(s) => Value::String(s.clone()),
            ResolvedValue::Bool(b) => Value::Bool(*b),
            ResolvedValue::Composite(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, field)| (key.clone(), field.to_json()))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl Serialize for ResolvedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// The result of resolving one token.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub value: ResolvedValue,
    /// The referenced path when the token's whole raw value is one alias.
    ///
    /// Values built from templates or literals carry no direct reference.
    pub aliased: Option<String>,
}

/// A graph token paired with its resolution outcome.
///
/// On error the token's raw value is untouched and available through
/// `token.raw`.
#[derive(Debug, Clone)]
pub struct ResolvedToken<'g> {
    pub token: &'g Token,
    pub outcome: Result<Resolution, AliasError>,
}

/// Resolves token values against one graph snapshot.
///
/// # Example
///
/// ```rust
/// use tokensync::{AliasResolver, ResolvedValue, Token, TokenGraph};
///
/// let graph = TokenGraph::from_tokens([
///     Token::new("spacing.base", 4),
///     Token::new("spacing.sm", "{spacing.base}"),
///     Token::new("spacing.inset", "{spacing.sm}px"),
/// ]);
/// let resolver = AliasResolver::new(&graph);
///
/// let sm = resolver.resolve_token(graph.get("spacing.sm").unwrap()).unwrap();
/// assert_eq!(sm.value, ResolvedValue::Number(4.0));
///
/// let inset = resolver.resolve_token(graph.get("spacing.inset").unwrap()).unwrap();
/// assert_eq!(inset.value, ResolvedValue::Text("4px".into()));
/// ```
///
/// Successful resolutions of referenced tokens are cached for the lifetime
/// of the resolver, so each token is resolved at most once however many
/// references reach it. Errors are not cached: a cycle is reported with the
/// chain seen from the token being resolved.
#[derive(Debug, Clone)]
pub struct AliasResolver<'g> {
    graph: &'g TokenGraph,
    resolved: RefCell<HashMap<String, ResolvedValue>>,
}

impl<'g> AliasResolver<'g> {
    pub fn new(graph: &'g TokenGraph) -> Self {
        Self {
            graph,
            resolved: RefCell::new(HashMap::new()),
        }
    }

    /// Resolves a token's raw value.
    ///
    /// The token does not have to be part of the graph; its name still seeds
    /// cycle detection.
    ///
    /// # Errors
    ///
    /// - [`AliasError::UnresolvedReference`] if a reference matches no token
    ///   or no field of a composite token
    /// - [`AliasError::CircularReference`] if a reference chain revisits a
    ///   token
    pub fn resolve_token(&self, token: &Token) -> Result<Resolution, AliasError> {
        let mut chain = vec![token.name.clone()];
        let value = self.resolve_value(&token.raw, &mut chain)?;
        let aliased = match &token.raw {
            TokenValue::Alias(path) => Some(path.as_str().to_string()),
            _ => None,
        };
        Ok(Resolution { value, aliased })
    }

    /// Resolves every token in the graph, in graph order.
    pub fn resolve_all(&self) -> Vec<ResolvedToken<'g>> {
        self.graph
            .iter()
            .map(|token| ResolvedToken {
                token,
                outcome: self.resolve_token(token),
            })
            .collect()
    }

    fn resolve_value(
        &self,
        value: &TokenValue,
        chain: &mut Vec<String>,
    ) -> Result<ResolvedValue, AliasError> {
        match value {
            TokenValue::Number(n) => Ok(ResolvedValue::Number(*n)),
            TokenValue::Text(s) => Ok(ResolvedValue::Text(s.clone())),
            TokenValue::Bool(b) => Ok(ResolvedValue::Bool(*b)),
            TokenValue::Composite(fields) => fields
                .iter()
                .map(|(key, field)| Ok((key.clone(), self.resolve_value(field, chain)?)))
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(ResolvedValue::Composite),
            TokenValue::Alias(path) => self.resolve_path(path, chain),
            TokenValue::Template(segments) => {
                let mut text = String::new();
                for segment in segments {
                    match segment {
                        Segment::Literal(s) => text.push_str(s),
                        Segment::Reference(path) => {
                            text.push_str(&self.resolve_path(path, chain)?.to_text())
                        }
                    }
                }
                Ok(ResolvedValue::Text(text))
            }
        }
    }

    fn resolve_path(
        &self,
        path: &AliasPath,
        chain: &mut Vec<String>,
    ) -> Result<ResolvedValue, AliasError> {
        let unresolved = || AliasError::UnresolvedReference {
            path: path.as_str().to_string(),
        };
        let (target, fields) = self.graph.lookup(path).ok_or_else(unresolved)?;

        if let Some(start) = chain.iter().position(|name| *name == target.name) {
            let mut cycle = chain[start..].to_vec();
            cycle.push(target.name.clone());
            return Err(AliasError::CircularReference { chain: cycle });
        }

        let cached = self.resolved.borrow().get(&target.name).cloned();
        let mut current = match cached {
            Some(value) => value,
            None => {
                chain.push(target.name.clone());
                let resolved = self.resolve_value(&target.raw, chain);
                chain.pop();
                let value = resolved?;
                self.resolved
                    .borrow_mut()
                    .insert(target.name.clone(), value.clone());
                value
            }
        };
        for field in fields {
            current = match current {
                ResolvedValue::Composite(mut entries) => {
                    entries.remove(field).ok_or_else(unresolved)?
                }
                _ => return Err(unresolved()),
            };
        }
        Ok(current)
    }
}

/// Resolves one token against a graph.
///
/// Shorthand for [`AliasResolver::resolve_token`] when only the value is needed.
pub fn resolve(token: &Token, graph: &TokenGraph) -> Result<ResolvedValue, AliasError> {
    AliasResolver::new(graph)
        .resolve_token(token)
        .map(|resolution| resolution.value)
}
