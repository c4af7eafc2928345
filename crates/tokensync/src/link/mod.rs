//! Reference linking.
//!
//! The creation pass writes every value as a literal, because a referenced
//! variable may not exist yet when its referrer is written. Once all themes
//! are materialized, this pass revisits each aliased value and, where a
//! variable for the aliased token exists, rewrites the literal into a live
//! reference to that variable.
//!
//! Target lookup prefers the source variable's own collection, where the
//! target must hold a value for the candidate's mode, and falls back to
//! another collection. Targets of a different kind are ignored, as is the
//! source itself. Candidates without a target keep their literal value.

use serde::Serialize;
use tracing::{debug, warn};

use crate::report::LinkSummary;
use crate::store::{ModeId, Variable, VariableId, VariableStore, VariableValue};
use crate::sync::variable_name;

/// A written value that came from a whole-value alias.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceCandidate {
    pub source_variable_id: VariableId,
    pub mode_id: ModeId,
    /// Dotted name of the token the alias pointed at.
    pub aliased_token_name: String,
    /// The literal that was written in the creation pass.
    pub resolved_value: VariableValue,
}

/// Rewrites candidate values into references where a target exists.
///
/// Store failures are collected into the summary; they never stop the
/// remaining candidates.
pub fn link<S: VariableStore + ?Sized>(
    store: &mut S,
    candidates: &[ReferenceCandidate],
) -> LinkSummary {
    let mut summary = LinkSummary::default();
    let variables = store.variables();

    for candidate in candidates {
        let Some(source) = variables
            .iter()
            .find(|v| v.id == candidate.source_variable_id)
        else {
            summary.errors.push(format!(
                "unknown variable '{}'",
                candidate.source_variable_id
            ));
            continue;
        };

        let Some(target) = find_target(&variables, source, candidate) else {
            debug!(
                variable = %source.name,
                alias = %candidate.aliased_token_name,
                "no variable to link, keeping literal"
            );
            summary
                .left_literal
                .push(candidate.aliased_token_name.clone());
            continue;
        };

        let reference = VariableValue::Alias(target.id.clone());
        match store.set_value(&source.id, &candidate.mode_id, reference) {
            Ok(()) => {
                debug!(variable = %source.name, target = %target.name, "linked");
                summary.linked += 1;
            }
            Err(err) => {
                warn!(variable = %source.name, error = %err, "could not link variable");
                summary.errors.push(err.to_string());
            }
        }
    }

    summary
}

fn find_target<'v>(
    variables: &'v [Variable],
    source: &Variable,
    candidate: &ReferenceCandidate,
) -> Option<&'v Variable> {
    let name = variable_name(&candidate.aliased_token_name);
    let eligible = |v: &&Variable| v.name == name && v.kind == source.kind && v.id != source.id;

    variables
        .iter()
        .filter(eligible)
        .find(|v| v.collection == source.collection && v.values.contains_key(&candidate.mode_id))
        .or_else(|| {
            variables
                .iter()
                .filter(eligible)
                .find(|v| v.collection != source.collection)
        })
}
