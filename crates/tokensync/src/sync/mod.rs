//! Variable synchronization.
//!
//! A run materializes every theme as a mode of a variable collection:
//!
//! | Theme field | Store object |
//! |-------------|--------------|
//! | `group` (or `name` when ungrouped) | collection |
//! | `name` | mode |
//! | effective token `color.bg` | variable `color/bg` |
//!
//! [`VariableSyncEngine`] does the work. [`create_local_variables`] is the
//! entry point used inside the sandbox: it fetches the themes from the host,
//! then runs the engine and the linking pass.

mod convert;
mod engine;
mod settings;

use tracing::info;

pub use convert::{to_variable_value, variable_kind, variable_name};
pub use engine::{LocalVariableInfo, SyncOutcome, VariableSyncEngine};
pub use settings::SyncSettings;

use crate::host::{HostError, MessageChannel};
use crate::store::VariableStore;
use crate::theme::ThemeDescriptor;
use crate::token::TokenSets;

/// Error that aborts a whole run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error("could not fetch themes from host: {0}")]
    Host(#[from] HostError),
}

/// Synchronizes `themes` into `store`, linking references if enabled.
pub fn synchronize<S: VariableStore + ?Sized>(
    store: &mut S,
    themes: &[ThemeDescriptor],
    sets: &TokenSets,
    settings: SyncSettings,
) -> SyncOutcome {
    VariableSyncEngine::new(store, settings).run(themes, sets)
}

/// Fetches the themes from the host and synchronizes them into `store`.
///
/// # Errors
///
/// Returns [`SyncError::Host`] if the host round trip fails. Every other
/// problem is recorded in the outcome's report.
pub async fn create_local_variables<S: VariableStore + ?Sized>(
    channel: &MessageChannel,
    store: &mut S,
    sets: &TokenSets,
    settings: SyncSettings,
) -> Result<SyncOutcome, SyncError> {
    let themes = channel.theme_info().await?;
    info!(themes = themes.len(), sets = sets.len(), "synchronizing variables");
    Ok(synchronize(store, &themes, sets, settings))
}
