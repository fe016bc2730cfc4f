//! Core engine types.
//!
//! This module contains the vocabulary a machine is defined in:
//! - States and state-carrying objects via the `State` and `StateObject` traits
//! - Caller events via the `Action` trait, wrapped in a `Trigger` on dispatch
//! - Guard predicates and their feedback channel

mod action;
mod guard;
mod state;

pub use action::{Action, Matcher, Trigger};
pub use guard::{Feedback, Guard};
pub use state::{State, StateObject};

pub(crate) use state::Accessors;
