//! Themes: named selections of token sets.
//!
//! This module provides:
//!
//! - [`ThemeDescriptor`]: a theme's id, name, optional group, and ordered set
//!   selection
//! - [`TokenSetStatus`]: whether a selected set is enabled, disabled, or a
//!   reference-only source
//! - [`project`]: the effective token view of one theme
//!
//! A theme's group (or its name, when ungrouped) names the target variable
//! collection; its name names the mode inside that collection.

mod descriptor;
mod projector;

pub use descriptor::{SelectedSet, SelectedSets, ThemeDescriptor, TokenSetStatus};
pub use projector::{project, ProjectedTheme};
