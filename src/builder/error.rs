//! Build errors for state machines.

use thiserror::Error;

/// Errors that can occur when freezing a machine definition.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Machine name is blank. Pass a non-empty name to the builder")]
    BlankName,

    #[error("No transitions defined for machine '{machine}'. Add at least one rule with .permit()")]
    NoTransitions { machine: String },
}
