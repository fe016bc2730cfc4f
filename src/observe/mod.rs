//! Dispatch diagnostics.
//!
//! The engine reports each dispatch call to an injectable [`Observer`] as a sequence of
//! [`TraceEvent`]s: a start event, the labelled guard sub-decisions, and an end event.
//! Observers are purely diagnostic; a failing observer never changes a transition.

pub mod error;
pub mod event;
pub mod observer;

pub use error::ObserveError;
pub use event::{Outcome, TraceContext, TraceEvent};
pub use observer::{Observer, RecordingObserver, TracingObserver};

pub(crate) use observer::deliver;
