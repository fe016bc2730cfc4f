//! The built machine: a frozen transition table plus the dispatch algorithm.
//!
//! # Key Concepts
//!
//! - **Rules**: `(source state, matcher)` keys map to ordered rule lists; registration
//!   order is the tie-break between rules that could both fire
//! - **Wildcards**: rules registered for `Matcher::Any` are tried before kind rules
//! - **Hooks**: exit and entry transforms run only when a rule changes the state
//! - **Validation**: an optional lint that reports rules and hooks that can never fire

mod dispatch;
mod table;
mod validate;

pub use dispatch::StateMachine;
pub use table::{AnyCallback, EventCallback, Hook, Rule};
pub use validate::ValidationIssue;

pub(crate) use table::{Callback, TransitionTable};
