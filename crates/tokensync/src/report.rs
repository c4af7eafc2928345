//! Synchronization run reports.
//!
//! Every theme of a run ends up in exactly one state:
//!
//! | Status | Meaning |
//! |--------|---------|
//! | `Synced` | every materializable token was written |
//! | `Partial` | some tokens are broken or malformed; the rest were written |
//! | `Skipped` | the collection or mode is missing and creation was not allowed |
//! | `Failed` | the store failed mid-theme; earlier writes were kept |

use std::fmt;

use serde::Serialize;

use crate::alias::AliasError;
use crate::store::VariableKind;
use crate::token::{MalformedTokenError, Token, TokenValue};

/// Why a token could not be written.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "camelCase")]
pub enum BrokenReason {
    #[error(transparent)]
    Alias(#[from] AliasError),
    #[error(transparent)]
    Malformed(#[from] MalformedTokenError),
    /// The variable already exists with another kind.
    #[error("existing variable holds {existing} values, token needs {needed}")]
    KindMismatch {
        existing: VariableKind,
        needed: VariableKind,
    },
}

/// A token that was left unwritten, with its raw value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrokenToken {
    pub name: String,
    pub raw: TokenValue,
    pub reason: BrokenReason,
}

impl BrokenToken {
    pub fn new(token: &Token, reason: impl Into<BrokenReason>) -> Self {
        Self {
            name: token.name.clone(),
            raw: token.raw.clone(),
            reason: reason.into(),
        }
    }
}

/// Why a theme was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SkipReason {
    MissingCollection { collection: String },
    MissingMode { collection: String, mode: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingCollection { collection } => {
                write!(f, "collection '{}' does not exist", collection)
            }
            SkipReason::MissingMode { collection, mode } => {
                write!(f, "collection '{}' has no mode '{}'", collection, mode)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ThemeStatus {
    Synced,
    Partial,
    Skipped { reason: SkipReason },
    Failed { error: String },
}

/// Outcome of one theme.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeReport {
    pub theme_id: String,
    pub theme_name: String,
    pub status: ThemeStatus,
    /// Tokens that could not be resolved or converted.
    pub broken: Vec<BrokenToken>,
    /// Tokens whose authored value was written as opaque text.
    pub malformed: Vec<BrokenToken>,
    /// Tokens whose type has no variable kind.
    pub unsupported: Vec<String>,
    /// Tokens with no existing variable in an update-only run.
    pub not_created: Vec<String>,
}

impl ThemeReport {
    pub(crate) fn new(theme_id: &str, theme_name: &str) -> Self {
        Self {
            theme_id: theme_id.to_string(),
            theme_name: theme_name.to_string(),
            status: ThemeStatus::Synced,
            broken: Vec::new(),
            malformed: Vec::new(),
            unsupported: Vec::new(),
            not_created: Vec::new(),
        }
    }

    /// Sets the status from what was recorded: partial if anything broke or
    /// was malformed.
    pub(crate) fn finish(&mut self) {
        self.status = if self.broken.is_empty() && self.malformed.is_empty() {
            ThemeStatus::Synced
        } else {
            ThemeStatus::Partial
        };
    }
}

/// Result of the reference-linking pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSummary {
    /// Values rewritten into references.
    pub linked: usize,
    /// Aliased token names with no matching variable; their values stay literal.
    pub left_literal: Vec<String>,
    /// Store failures while linking.
    pub errors: Vec<String>,
}

/// Report of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncReport {
    pub themes: Vec<ThemeReport>,
    pub links: LinkSummary,
}

impl SyncReport {
    pub fn theme(&self, theme_id: &str) -> Option<&ThemeReport> {
        self.themes.iter().find(|t| t.theme_id == theme_id)
    }

    fn count(&self, matches: impl Fn(&ThemeStatus) -> bool) -> usize {
        self.themes.iter().filter(|t| matches(&t.status)).count()
    }

    pub fn synced(&self) -> usize {
        self.count(|s| matches!(s, ThemeStatus::Synced))
    }

    pub fn partial(&self) -> usize {
        self.count(|s| matches!(s, ThemeStatus::Partial))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, ThemeStatus::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, ThemeStatus::Failed { .. }))
    }

    /// Broken tokens across all themes, in theme order.
    pub fn broken_tokens(&self) -> impl Iterator<Item = &BrokenToken> {
        self.themes.iter().flat_map(|t| t.broken.iter())
    }
}
