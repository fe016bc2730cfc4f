//! Statewise: a declarative, table-driven state machine engine.
//!
//! A machine is a frozen table of guarded rules over a caller's own immutable object
//! type. Dispatching an event never mutates anything: it computes the next object, or
//! reports that no rule applies.
//!
//! # Core Concepts
//!
//! - **State**: a closed enumeration implementing [`State`]
//! - **Action**: caller events implementing [`Action`], dispatched as a [`Trigger`]
//! - **Rules**: `(source state, matcher) -> ordered rules`, first accepting guard wins
//! - **Wildcards and loops**: `Matcher::Any` rules are tried before kind rules, and
//!   [`StateMachine::tick`] re-evaluates them without a new event
//! - **Hooks**: exit and entry transforms run when a rule changes the state
//! - **Observers**: every dispatch is reported to an injectable [`Observer`]
//!
//! # Example
//!
//! ```rust
//! use statewise::builder::MachineBuilder;
//! use statewise::core::Guard;
//! use statewise::{action_enum, state_enum};
//!
//! state_enum! {
//!     enum Gate {
//!         Locked,
//!         Unlocked,
//!     }
//! }
//!
//! action_enum! {
//!     enum GateAction => GateActionKind {
//!         Coin { cents: u32 },
//!         Push,
//!     }
//! }
//!
//! #[derive(Clone, Debug)]
//! struct Turnstile {
//!     gate: Gate,
//!     takings: u32,
//! }
//!
//! let mut builder = MachineBuilder::<Gate, GateAction, Turnstile>::new(
//!     "Turnstile",
//!     |t: &Turnstile| t.gate,
//!     |t: Turnstile, gate: Gate| Turnstile { gate, ..t },
//!     |t: &Turnstile| format!("turnstile({})", t.takings),
//! );
//! builder
//!     .from_state(Gate::Locked)
//!     .permit_with(GateActionKind::Coin, Gate::Unlocked, |action, t: Turnstile| {
//!         match action {
//!             GateAction::Coin { cents } => Turnstile { takings: t.takings + cents, ..t },
//!             _ => t,
//!         }
//!     });
//! builder
//!     .from_state(Gate::Unlocked)
//!     .permit(GateActionKind::Push, Gate::Locked)
//!     .permit_if(
//!         GateActionKind::Coin,
//!         Gate::Unlocked,
//!         Guard::when(|t: &Turnstile| t.takings < 1_000),
//!     );
//! let machine = builder.build().unwrap();
//!
//! let locked = Turnstile { gate: Gate::Locked, takings: 0 };
//! let unlocked = machine.transition(&locked, GateAction::Coin { cents: 50 }).unwrap();
//! assert_eq!(unlocked.gate, Gate::Unlocked);
//! assert_eq!(unlocked.takings, 50);
//!
//! // No rule for pushing a locked gate.
//! assert!(machine.transition(&locked, GateAction::Push).is_none());
//! ```

pub mod builder;
pub mod core;
pub mod machine;
pub mod observe;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder, StateScope};
pub use core::{Action, Feedback, Guard, Matcher, State, StateObject, Trigger};
pub use machine::{StateMachine, ValidationIssue};
pub use observe::{Observer, RecordingObserver, TraceEvent, TracingObserver};
