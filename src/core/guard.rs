//! Guard predicates and the feedback protocol.
//!
//! A guard decides whether a candidate rule fires. While deciding, it may record
//! labelled sub-decisions through [`Feedback`]; those only reach the machine's observer
//! and never influence which rule wins.

use crate::observe::{deliver, Observer, TraceContext, TraceEvent};

type Predicate<O> = Box<dyn Fn(&O, &Feedback<'_>) -> bool + Send + Sync>;

/// Pure predicate that gates a candidate transition.
///
/// # Example
///
/// ```rust
/// use statewise::core::{Feedback, Guard};
///
/// struct Account {
///     balance: i64,
/// }
///
/// let solvent = Guard::labelled("balance is positive", |a: &Account| a.balance > 0);
///
/// assert!(solvent.check(&Account { balance: 10 }, &Feedback::silent()));
/// assert!(!solvent.check(&Account { balance: -5 }, &Feedback::silent()));
/// ```
pub struct Guard<O> {
    predicate: Predicate<O>,
    unconditional: bool,
}

impl<O: 'static> Guard<O> {
    /// Create a guard that can report sub-decisions through feedback.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&O, &Feedback<'_>) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
            unconditional: false,
        }
    }

    /// Create a guard from a plain predicate over the object.
    pub fn when<F>(predicate: F) -> Self
    where
        F: Fn(&O) -> bool + Send + Sync + 'static,
    {
        Self::new(move |object: &O, _feedback: &Feedback<'_>| predicate(object))
    }

    /// Create a guard whose outcome is recorded under `label`.
    pub fn labelled<F>(label: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&O) -> bool + Send + Sync + 'static,
    {
        let label = label.into();
        Self::new(move |object: &O, feedback: &Feedback<'_>| {
            feedback.record(&label, predicate(object))
        })
    }

    /// Guard that accepts every object.
    pub fn always() -> Self {
        Guard {
            predicate: Box::new(|_: &O, _: &Feedback<'_>| true),
            unconditional: true,
        }
    }
}

impl<O> Guard<O> {
    pub fn check(&self, object: &O, feedback: &Feedback<'_>) -> bool {
        (self.predicate)(object, feedback)
    }

    /// Whether this guard was built with [`Guard::always`].
    pub fn is_unconditional(&self) -> bool {
        self.unconditional
    }
}

/// Channel through which a guard reports labelled sub-decisions.
pub struct Feedback<'a> {
    sink: Option<FeedbackSink<'a>>,
}

struct FeedbackSink<'a> {
    observer: &'a dyn Observer,
    context: &'a TraceContext,
    to: &'a str,
}

impl<'a> Feedback<'a> {
    /// Feedback that discards every record.
    pub fn silent() -> Self {
        Feedback { sink: None }
    }

    pub(crate) fn reporting(
        observer: &'a dyn Observer,
        context: &'a TraceContext,
        to: &'a str,
    ) -> Self {
        Feedback {
            sink: Some(FeedbackSink {
                observer,
                context,
                to,
            }),
        }
    }

    /// Record a labelled sub-decision. Returns `outcome` unchanged.
    pub fn record(&self, label: &str, outcome: bool) -> bool {
        if let Some(sink) = &self.sink {
            let event = TraceEvent::Guard {
                context: sink.context.clone(),
                to: sink.to.to_string(),
                label: label.to_string(),
                accepted: outcome,
            };
            deliver(sink.observer, &event);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::RecordingObserver;
    use chrono::Utc;
    use uuid::Uuid;

    struct Meter {
        reading: u32,
    }

    fn context() -> TraceContext {
        TraceContext {
            machine: "Meter".to_string(),
            transition_id: Uuid::new_v4(),
            object: "meter-1".to_string(),
            from: "Idle".to_string(),
            action: "Loop".to_string(),
            started_at: Utc::now(),
        }
    }

    #[test]
    fn when_guard_checks_predicate() {
        let guard = Guard::when(|m: &Meter| m.reading > 10);

        assert!(guard.check(&Meter { reading: 11 }, &Feedback::silent()));
        assert!(!guard.check(&Meter { reading: 10 }, &Feedback::silent()));
        assert!(!guard.is_unconditional());
    }

    #[test]
    fn always_guard_is_unconditional() {
        let guard = Guard::<Meter>::always();

        assert!(guard.check(&Meter { reading: 0 }, &Feedback::silent()));
        assert!(guard.is_unconditional());
    }

    #[test]
    fn record_returns_outcome_unchanged() {
        let feedback = Feedback::silent();

        assert!(feedback.record("yes", true));
        assert!(!feedback.record("no", false));
    }

    #[test]
    fn labelled_guard_reports_to_observer() {
        let recorder = RecordingObserver::new();
        let ctx = context();
        let feedback = Feedback::reporting(&recorder, &ctx, "Alarm");
        let guard = Guard::labelled("reading above threshold", |m: &Meter| m.reading > 10);

        assert!(!guard.check(&Meter { reading: 3 }, &feedback));

        let events = recorder.events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            TraceEvent::Guard {
                to,
                label,
                accepted,
                ..
            } => {
                assert_eq!(to, "Alarm");
                assert_eq!(label, "reading above threshold");
                assert!(!accepted);
            }
            other => panic!("Expected guard event, got {other:?}"),
        }
    }

    #[test]
    fn guard_can_record_several_sub_decisions() {
        let recorder = RecordingObserver::new();
        let ctx = context();
        let feedback = Feedback::reporting(&recorder, &ctx, "Alarm");
        let guard = Guard::new(|m: &Meter, fb: &Feedback<'_>| {
            fb.record("non-zero", m.reading > 0) && fb.record("above limit", m.reading > 100)
        });

        assert!(!guard.check(&Meter { reading: 50 }, &feedback));
        assert_eq!(recorder.events().len(), 2);
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::when(|m: &Meter| m.reading % 2 == 0);
        let meter = Meter { reading: 4 };

        let result1 = guard.check(&meter, &Feedback::silent());
        let result2 = guard.check(&meter, &Feedback::silent());

        assert_eq!(result1, result2);
    }
}
