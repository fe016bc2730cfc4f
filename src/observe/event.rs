//! Structured dispatch lifecycle events.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Fields shared by every event of one dispatch call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TraceContext {
    /// Name given to the machine at construction
    pub machine: String,
    /// Correlation id, fresh for each dispatch call
    pub transition_id: Uuid,
    /// Identifier of the object being dispatched on
    pub object: String,
    /// Source state name
    pub from: String,
    /// Debug rendering of the trigger
    pub action: String,
    pub started_at: DateTime<Utc>,
}

/// How a dispatch call ended.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    /// A rule fired; `object` identifies the resulting object
    Transitioned { to: String, object: String },
    /// No candidate rule accepted
    NotFound,
}

/// One phase of a dispatch call.
///
/// Every call emits exactly one `Start`, then zero or more `Guard` events, then exactly
/// one `End`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum TraceEvent {
    Start {
        context: TraceContext,
    },
    Guard {
        context: TraceContext,
        to: String,
        label: String,
        accepted: bool,
    },
    End {
        context: TraceContext,
        outcome: Outcome,
    },
}

impl TraceEvent {
    pub fn context(&self) -> &TraceContext {
        match self {
            TraceEvent::Start { context }
            | TraceEvent::Guard { context, .. }
            | TraceEvent::End { context, .. } => context,
        }
    }

    pub fn phase(&self) -> &'static str {
        match self {
            TraceEvent::Start { .. } => "start",
            TraceEvent::Guard { .. } => "guard",
            TraceEvent::End { .. } => "end",
        }
    }
}
