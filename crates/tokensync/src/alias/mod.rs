//! Alias resolution.
//!
//! A token value may reference other tokens by dotted path, either as its
//! whole value (`"{spacing.sm}"`), embedded in text (`"{spacing.sm}px"`), or
//! inside a composite field. [`AliasResolver`] replaces every reference with
//! the target's resolved value:
//!
//! - a whole-value alias keeps the target's native type (number, text,
//!   composite)
//! - an embedded alias is coerced to text
//! - composites are resolved field by field
//!
//! Resolution recurses through chains of aliases, tracking the names visited
//! so far; revisiting one is a [`AliasError::CircularReference`]. A path that
//! matches nothing is an [`AliasError::UnresolvedReference`]. Errors are
//! returned per token so that one broken token never blocks the others.

mod error;
pub(crate) mod parse;
mod resolver;

pub use error::AliasError;
pub use parse::AliasPath;
pub use resolver::{resolve, AliasResolver, Resolution, ResolvedToken, ResolvedValue};
