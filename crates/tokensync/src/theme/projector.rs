//! Per-theme token projection.

use tracing::warn;

use super::descriptor::{ThemeDescriptor, TokenSetStatus};
use crate::graph::TokenGraph;
use crate::token::TokenSets;

/// The token view of one theme.
#[derive(Debug, Clone, Default)]
pub struct ProjectedTheme {
    /// Tokens from enabled sets, last applied set winning per name.
    pub effective: TokenGraph,
    /// Tokens references may resolve against: enabled and source sets.
    pub graph: TokenGraph,
}

/// Projects a theme onto the available token sets.
///
/// Sets are applied in the theme's selection order. Disabled sets are
/// skipped; source sets only join the resolution graph. Selected names with
/// no matching set are skipped with a warning.
///
/// # Example
///
/// ```rust
/// use tokensync::{project, Token, TokenSet, TokenSets, ThemeDescriptor};
///
/// let sets = TokenSets::new()
///     .with(TokenSet::new("base").add(Token::new("color.brand", "#111")))
///     .with(TokenSet::new("override").add(Token::new("color.brand", "#222")));
///
/// let theme = ThemeDescriptor::new("1", "brand").enable("base").enable("override");
/// let projected = project(&theme, &sets);
///
/// assert_eq!(projected.effective.get("color.brand").unwrap().raw.to_string(), "#222");
/// ```
pub fn project(theme: &ThemeDescriptor, sets: &TokenSets) -> ProjectedTheme {
    let mut projected = ProjectedTheme::default();

    for selected in theme.selected_token_sets.iter() {
        if selected.status == TokenSetStatus::Disabled {
            continue;
        }
        let Some(set) = sets.get(&selected.name) else {
            warn!(
                theme = %theme.name,
                set = %selected.name,
                "theme selects a token set that does not exist"
            );
            continue;
        };

        projected.graph.extend(set.tokens.iter().cloned());
        if selected.status == TokenSetStatus::Enabled {
            projected.effective.extend(set.tokens.iter().cloned());
        }
    }

    projected
}
