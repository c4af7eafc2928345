//! Alias resolution errors.

use serde::Serialize;

/// Error returned when a token's references cannot be resolved.
///
/// Both variants are per-token: the token keeps its raw value and the rest
/// of the batch is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AliasError {
    /// A reference names a path that matches no token
    #[error("reference '{path}' does not match any token")]
    UnresolvedReference { path: String },
    /// A reference chain revisits a token
    #[error("circular reference: {}", chain.join(" -> "))]
    CircularReference { chain: Vec<String> },
}
