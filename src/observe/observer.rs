//! Observer trait and the bundled observers.

use crate::observe::error::ObserveError;
use crate::observe::event::{Outcome, TraceEvent};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Mutex;

/// Sink for dispatch lifecycle events.
///
/// Observers are shared by every dispatch call of a machine, so they must be
/// `Send + Sync`. Returning an error only degrades diagnostics: the engine logs it and
/// carries on with the transition. Implementations should report failures as errors
/// rather than panic; a panic is caught and logged the same way, but the default panic
/// hook still prints it.
pub trait Observer: Send + Sync {
    fn observe(&self, event: &TraceEvent) -> Result<(), ObserveError>;
}

/// Forward an event, swallowing observer errors and panics.
pub(crate) fn deliver(observer: &dyn Observer, event: &TraceEvent) {
    match panic::catch_unwind(AssertUnwindSafe(|| observer.observe(event))) {
        Ok(Ok(())) => {}
        Ok(Err(error)) => tracing::warn!(
            %error,
            phase = event.phase(),
            transition_id = %event.context().transition_id,
            "dropping trace event"
        ),
        Err(_) => tracing::warn!(
            phase = event.phase(),
            transition_id = %event.context().transition_id,
            "observer panicked, dropping trace event"
        ),
    }
}

/// Default observer: writes every event through `tracing`.
///
/// Start and end phases are logged at `info`, guard sub-decisions at `debug`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn observe(&self, event: &TraceEvent) -> Result<(), ObserveError> {
        match event {
            TraceEvent::Start { context } => tracing::info!(
                machine = %context.machine,
                transition_id = %context.transition_id,
                object = %context.object,
                from = %context.from,
                action = %context.action,
                "transition started"
            ),
            TraceEvent::Guard {
                context,
                to,
                label,
                accepted,
            } => {
                let verdict = if *accepted { "ACCEPTED" } else { "REJECTED" };
                tracing::debug!(
                    machine = %context.machine,
                    transition_id = %context.transition_id,
                    object = %context.object,
                    from = %context.from,
                    to = %to,
                    action = %context.action,
                    verdict,
                    "guard feedback: {}",
                    label
                )
            }
            TraceEvent::End {
                context,
                outcome: Outcome::Transitioned { to, object },
            } => tracing::info!(
                machine = %context.machine,
                transition_id = %context.transition_id,
                object = %context.object,
                from = %context.from,
                to = %to,
                action = %context.action,
                result = %object,
                "transition complete"
            ),
            TraceEvent::End {
                context,
                outcome: Outcome::NotFound,
            } => tracing::info!(
                machine = %context.machine,
                transition_id = %context.transition_id,
                object = %context.object,
                from = %context.from,
                action = %context.action,
                "no transition found"
            ),
        }
        Ok(())
    }
}

/// Observer that keeps every event in memory.
///
/// Useful in tests and for exporting a dispatch trace as JSON lines.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<TraceEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far, oldest first.
    pub fn events(&self) -> Vec<TraceEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Drop all recorded events.
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Render the recorded events as one JSON document per line.
    pub fn to_json_lines(&self) -> Result<String, ObserveError> {
        let events = self.events.lock().map_err(|_| ObserveError::Poisoned)?;
        let mut out = String::new();
        for event in events.iter() {
            out.push_str(&serde_json::to_string(event)?);
            out.push('\n');
        }
        Ok(out)
    }
}

impl Observer for RecordingObserver {
    fn observe(&self, event: &TraceEvent) -> Result<(), ObserveError> {
        let mut events = self.events.lock().map_err(|_| ObserveError::Poisoned)?;
        events.push(event.clone());
        Ok(())
    }
}
