//! Design-token resolution and themed variable synchronization.
//!
//! Tokens are named style values (`color.bg = "#ffffff"`) that may reference
//! each other (`color.fg = "{color.bg}"`). Tokens are grouped into sets, and
//! a theme selects which sets apply. This crate turns themes into variables
//! of an external store: one collection per theme group, one mode per theme,
//! one variable per token.
//!
//! # Pipeline
//!
//! 1. [`project`] merges a theme's selected sets into its effective tokens
//!    and resolution graph, last listed set winning
//! 2. [`AliasResolver`] replaces every reference with a concrete value,
//!    reporting unresolved and circular references per token
//! 3. [`VariableSyncEngine`] creates or updates collections, modes, and
//!    variables through the [`store::VariableStore`] trait
//! 4. [`link_references`] rewrites aliased values into live variable
//!    references once every theme is materialized
//!
//! [`create_local_variables`] runs the whole pipeline after fetching the
//! themes from the host over a [`host::MessageChannel`].
//!
//! # Example
//!
//! ```rust
//! use tokensync::store::{MemoryStore, VariableStore, VariableValue};
//! use tokensync::{synchronize, SyncSettings, ThemeDescriptor, Token, TokenSet, TokenSets};
//!
//! let sets = TokenSets::new().with(
//!     TokenSet::new("core")
//!         .add(Token::new("color.bg", "#ffffff"))
//!         .add(Token::new("color.fg", "{color.bg}")),
//! );
//! let themes = [ThemeDescriptor::new("t1", "light").enable("core")];
//!
//! let mut store = MemoryStore::new();
//! let outcome = synchronize(&mut store, &themes, &sets, SyncSettings::default());
//!
//! assert_eq!(outcome.report.synced(), 1);
//! let info = &outcome.variables["t1"];
//! let fg = store.variable(&info.variable_ids["color.fg"]).unwrap();
//! assert_eq!(
//!     fg.values[&info.mode_id],
//!     VariableValue::Alias(info.variable_ids["color.bg"].clone())
//! );
//! ```
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`token`] | tokens, token values, token sets |
//! | [`graph`] | name-indexed token graph |
//! | [`alias`] | reference syntax and resolution |
//! | [`theme`] | theme descriptors and projection |
//! | [`store`] | variable store trait and in-memory store |
//! | [`sync`] | the sync engine and its settings |
//! | [`link`] | the reference-linking pass |
//! | [`host`] | request/response channel to the host |
//! | [`report`] | per-run reports |

pub mod alias;
pub mod graph;
pub mod host;
pub mod link;
pub mod report;
pub mod store;
pub mod sync;
pub mod theme;
pub mod token;

pub use alias::{
    resolve, AliasError, AliasPath, AliasResolver, Resolution, ResolvedToken, ResolvedValue,
};
pub use graph::TokenGraph;
pub use link::{link as link_references, ReferenceCandidate};
pub use report::{
    BrokenReason, BrokenToken, LinkSummary, SkipReason, SyncReport, ThemeReport, ThemeStatus,
};
pub use sync::{
    create_local_variables, synchronize, LocalVariableInfo, SyncError, SyncOutcome, SyncSettings,
    VariableSyncEngine,
};
pub use theme::{project, ProjectedTheme, ThemeDescriptor, TokenSetStatus};
pub use token::{MalformedTokenError, Segment, Token, TokenSet, TokenSets, TokenType, TokenValue};
