//! Static checks over a built transition table.
//!
//! Uses Stillwater's `Validation` so that every problem in a table is reported in one
//! pass instead of stopping at the first one.

use crate::core::{Action, Matcher, State};
use crate::machine::dispatch::StateMachine;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A table entry that can never have an effect.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationIssue {
    #[error("Rule #{index} for {on} from '{from}' can never fire: an earlier unconditional rule always wins")]
    ShadowedRule {
        from: String,
        on: String,
        index: usize,
    },

    #[error("State '{state}' has entry hooks but no rule enters it")]
    UnreachableEntryHooks { state: String },

    #[error("State '{state}' has exit hooks but no rule leaves it")]
    UnreachableExitHooks { state: String },

    #[error("Final state '{state}' has outgoing rules")]
    FinalStateHasRules { state: String },
}

type Check = Validation<(), NonEmptyVec<ValidationIssue>>;

fn issue(found: bool, make: impl FnOnce() -> ValidationIssue) -> Check {
    if found {
        Validation::fail(make())
    } else {
        Validation::success(())
    }
}

impl<S: State, A: Action, O: Clone> StateMachine<S, A, O> {
    /// Check the table for rules and hooks that can never take effect.
    ///
    /// Dispatch works on any table; this is a lint for table authors. All issues are
    /// accumulated.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ValidationIssue>> {
        let mut checks: Vec<Check> = Vec::new();
        let mut final_sources: Vec<&S> = Vec::new();

        for (from, on, rules) in self.table.groups() {
            let wildcard_open = self
                .table
                .rules_for(from, Matcher::Any)
                .iter()
                .any(|rule| rule.guard.is_unconditional());
            let first_open = rules.iter().position(|rule| rule.guard.is_unconditional());

            for index in 0..rules.len() {
                let shadowed_in_group = first_open.is_some_and(|open| index > open);
                let shadowed = match on {
                    Matcher::Any => shadowed_in_group,
                    Matcher::Kind(_) => wildcard_open || shadowed_in_group,
                };
                checks.push(issue(shadowed, || ValidationIssue::ShadowedRule {
                    from: from.name().to_string(),
                    on: on.to_string(),
                    index,
                }));
            }

            if from.is_final() && !final_sources.contains(&from) {
                final_sources.push(from);
            }
        }

        for state in final_sources {
            checks.push(Validation::fail(ValidationIssue::FinalStateHasRules {
                state: state.name().to_string(),
            }));
        }

        for state in self.table.entry_states() {
            let entered = self
                .table
                .rules()
                .any(|rule| rule.to == *state && rule.changes_state());
            checks.push(issue(!entered, || ValidationIssue::UnreachableEntryHooks {
                state: state.name().to_string(),
            }));
        }

        for state in self.table.exit_states() {
            let left = self
                .table
                .rules()
                .any(|rule| rule.from == *state && rule.changes_state());
            checks.push(issue(!left, || ValidationIssue::UnreachableExitHooks {
                state: state.name().to_string(),
            }));
        }

        Validation::all_vec(checks).map(|_| ())
    }
}
