//! Theme-by-theme reconciliation of the variable store.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::convert::{to_variable_value, variable_kind, variable_name};
use super::settings::SyncSettings;
use crate::alias::AliasResolver;
use crate::link::{link, ReferenceCandidate};
use crate::report::{BrokenReason, BrokenToken, SkipReason, SyncReport, ThemeReport, ThemeStatus};
use crate::store::{CollectionId, ModeId, StoreError, VariableId, VariableStore};
use crate::theme::{project, ThemeDescriptor};
use crate::token::TokenSets;

/// Where one theme's tokens were materialized.
///
/// Callers persist this to link themes to variables for later
/// update-only runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalVariableInfo {
    pub collection_id: CollectionId,
    pub mode_id: ModeId,
    /// Token name to variable id.
    pub variable_ids: BTreeMap<String, VariableId>,
}

/// Everything a run produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncOutcome {
    /// Theme id to materialization info, for themes that were not skipped or failed.
    pub variables: BTreeMap<String, LocalVariableInfo>,
    /// Aliased values eligible for the linking pass.
    pub candidates: Vec<ReferenceCandidate>,
    pub report: SyncReport,
}

enum ThemeSync {
    Done(LocalVariableInfo),
    Skipped(SkipReason),
}

/// Reconciles themes against a [`VariableStore`].
///
/// For each theme, in order:
///
/// 1. Find the collection named by the theme's group (or name), creating it
///    if allowed
/// 2. Find the mode named by the theme, creating it if allowed
/// 3. Resolve every effective token and write its value for that mode,
///    reusing the variable with the token's name or creating one
///
/// Lookups are by name, so running twice over unchanged input changes
/// nothing. Broken tokens are reported and skipped; a store failure ends
/// the current theme only. Nothing is ever deleted.
///
/// # Example
///
/// ```rust
/// use tokensync::store::{MemoryStore, VariableStore, VariableValue};
/// use tokensync::{SyncSettings, ThemeDescriptor, Token, TokenSet, TokenSets, VariableSyncEngine};
///
/// let sets = TokenSets::new().with(
///     TokenSet::new("core")
///         .add(Token::new("spacing.lg", 8))
///         .add(Token::new("spacing.xl", "{spacing.lg}")),
/// );
/// let themes = [ThemeDescriptor::new("t1", "default").enable("core")];
///
/// let mut store = MemoryStore::new();
/// let outcome = VariableSyncEngine::new(&mut store, SyncSettings::default()).run(&themes, &sets);
///
/// let info = &outcome.variables["t1"];
/// let xl = store.variable(&info.variable_ids["spacing.xl"]).unwrap();
/// assert_eq!(
///     xl.values[&info.mode_id],
///     VariableValue::Alias(info.variable_ids["spacing.lg"].clone())
/// );
/// ```
pub struct VariableSyncEngine<'s, S: VariableStore + ?Sized> {
    store: &'s mut S,
    settings: SyncSettings,
}

impl<'s, S: VariableStore + ?Sized> VariableSyncEngine<'s, S> {
    pub fn new(store: &'s mut S, settings: SyncSettings) -> Self {
        Self { store, settings }
    }

    /// Runs the creation/update pass for all themes, then the linking pass.
    ///
    /// Linking is skipped when `link_references` is off.
    pub fn run(mut self, themes: &[ThemeDescriptor], sets: &TokenSets) -> SyncOutcome {
        let mut outcome = self.sync(themes, sets);
        if self.settings.link_references {
            outcome.report.links = link(&mut *self.store, &outcome.candidates);
        }
        outcome
    }

    /// Runs the creation/update pass only.
    pub fn sync(&mut self, themes: &[ThemeDescriptor], sets: &TokenSets) -> SyncOutcome {
        let mut outcome = SyncOutcome::default();

        for theme in themes {
            let mut report = ThemeReport::new(&theme.id, &theme.name);
            match self.sync_theme(theme, sets, &mut report, &mut outcome.candidates) {
                Ok(ThemeSync::Done(info)) => {
                    report.finish();
                    debug!(
                        theme = %theme.name,
                        variables = info.variable_ids.len(),
                        broken = report.broken.len(),
                        "theme synced"
                    );
                    outcome.variables.insert(theme.id.clone(), info);
                }
                Ok(ThemeSync::Skipped(reason)) => {
                    info!(theme = %theme.name, %reason, "theme skipped");
                    report.status = ThemeStatus::Skipped { reason };
                }
                Err(err) => {
                    warn!(theme = %theme.name, error = %err, "theme aborted");
                    report.status = ThemeStatus::Failed {
                        error: err.to_string(),
                    };
                }
            }
            outcome.report.themes.push(report);
        }

        outcome
    }

    fn sync_theme(
        &mut self,
        theme: &ThemeDescriptor,
        sets: &TokenSets,
        report: &mut ThemeReport,
        candidates: &mut Vec<ReferenceCandidate>,
    ) -> Result<ThemeSync, StoreError> {
        let (collection_id, mode_id) = match self.target(theme)? {
            Ok(target) => target,
            Err(reason) => return Ok(ThemeSync::Skipped(reason)),
        };

        let projected = project(theme, sets);
        let resolver = AliasResolver::new(&projected.graph);
        let mut variable_ids = BTreeMap::new();

        for token in projected.effective.iter() {
            let Some(kind) = variable_kind(token.token_type) else {
                report.unsupported.push(token.name.clone());
                continue;
            };

            let resolution = match resolver.resolve_token(token) {
                Ok(resolution) => resolution,
                Err(err) => {
                    warn!(
                        theme = %theme.name,
                        token = %token.name,
                        error = %err,
                        "leaving token unresolved"
                    );
                    report.broken.push(BrokenToken::new(token, err));
                    continue;
                }
            };
            let value = match to_variable_value(kind, &resolution.value) {
                Ok(value) => value,
                Err(err) => {
                    warn!(
                        theme = %theme.name,
                        token = %token.name,
                        error = %err,
                        "value does not fit variable kind"
                    );
                    report.broken.push(BrokenToken::new(token, err));
                    continue;
                }
            };

            let name = variable_name(&token.name);
            let variable_id = match self.store.find_variable(&collection_id, &name) {
                Some(existing) if existing.kind == kind => existing.id,
                Some(existing) => {
                    report.broken.push(BrokenToken::new(
                        token,
                        BrokenReason::KindMismatch {
                            existing: existing.kind,
                            needed: kind,
                        },
                    ));
                    continue;
                }
                None if self.settings.should_create => {
                    self.store.create_variable(&collection_id, &name, kind)?
                }
                None => {
                    report.not_created.push(token.name.clone());
                    continue;
                }
            };

            self.store.set_value(&variable_id, &mode_id, value.clone())?;
            if let Some(err) = &token.malformed {
                warn!(
                    theme = %theme.name,
                    token = %token.name,
                    error = %err,
                    "wrote malformed value as text"
                );
                report.malformed.push(BrokenToken::new(token, err.clone()));
            }
            if let Some(aliased) = resolution.aliased {
                candidates.push(ReferenceCandidate {
                    source_variable_id: variable_id.clone(),
                    mode_id: mode_id.clone(),
                    aliased_token_name: aliased,
                    resolved_value: value,
                });
            }
            variable_ids.insert(token.name.clone(), variable_id);
        }

        Ok(ThemeSync::Done(LocalVariableInfo {
            collection_id,
            mode_id,
            variable_ids,
        }))
    }

    /// Finds or creates the collection and mode a theme writes to.
    fn target(
        &mut self,
        theme: &ThemeDescriptor,
    ) -> Result<Result<(CollectionId, ModeId), SkipReason>, StoreError> {
        let collection_name = theme.collection_name();
        let mode_name = theme.mode_name();

        match self.store.find_collection(collection_name) {
            Some(collection) => {
                if let Some(mode_id) = collection.mode(mode_name).map(|m| m.id.clone()) {
                    return Ok(Ok((collection.id, mode_id)));
                }
                if !self.settings.should_create {
                    return Ok(Err(SkipReason::MissingMode {
                        collection: collection_name.to_string(),
                        mode: mode_name.to_string(),
                    }));
                }
                let mode_id = self.store.create_mode(&collection.id, mode_name)?;
                info!(collection = collection_name, mode = mode_name, "created mode");
                Ok(Ok((collection.id, mode_id)))
            }
            None if self.settings.should_create => {
                let collection = self.store.create_collection(collection_name)?;
                let mode_id = match collection.modes.first() {
                    Some(first) => {
                        self.store.rename_mode(&collection.id, &first.id, mode_name)?;
                        first.id.clone()
                    }
                    None => self.store.create_mode(&collection.id, mode_name)?,
                };
                info!(collection = collection_name, mode = mode_name, "created collection");
                Ok(Ok((collection.id, mode_id)))
            }
            None => Ok(Err(SkipReason::MissingCollection {
                collection: collection_name.to_string(),
            })),
        }
    }
}
