//! Builder API for declaring state machines.
//!
//! This module provides the fluent [`MachineBuilder`] / [`StateScope`] pair and the
//! declaration macros that cut the boilerplate of state and action enums.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::{MachineBuilder, StateScope};
