//! Frozen state machine and the dispatch algorithm.

use crate::core::{Accessors, Action, Feedback, Matcher, State, Trigger};
use crate::machine::table::{Rule, TransitionTable};
use crate::observe::{deliver, Observer, Outcome, TraceContext, TraceEvent};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// An immutable transition table bound to an object type.
///
/// Built once through [`MachineBuilder`](crate::builder::MachineBuilder). After that it
/// holds no mutable state: dispatch only reads the table, so a machine can be shared
/// across threads and used concurrently on independent objects.
pub struct StateMachine<S: State, A: Action, O> {
    pub(crate) name: String,
    pub(crate) accessors: Accessors<S, O>,
    pub(crate) table: TransitionTable<S, A, O>,
    pub(crate) observer: Arc<dyn Observer>,
}

impl<S: State, A: Action, O: Clone> StateMachine<S, A, O> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Compute the object that results from applying `action` to `object`.
    ///
    /// Returns `None` when no rule registered for the object's state accepts; that is
    /// a normal outcome and `object` is left as it was.
    ///
    /// Candidates are the source state's wildcard rules followed by its rules for the
    /// trigger's kind, each list in registration order. The first rule whose guard
    /// accepts wins. If it moves the object to another state, the source state's exit
    /// hooks run, then the destination state's entry hooks, then the new state is
    /// recorded; the rule's callback runs last.
    ///
    /// # Panics
    ///
    /// Guards, hooks and callbacks are expected to be total. A panic raised by any of
    /// them propagates to the caller.
    pub fn transition(&self, object: &O, action: impl Into<Trigger<A>>) -> Option<O> {
        let trigger = action.into();
        let from = self.accessors.state_of(object);
        let context = TraceContext {
            machine: self.name.clone(),
            transition_id: Uuid::new_v4(),
            object: self.accessors.identify(object),
            from: from.name().to_string(),
            action: format!("{trigger:?}"),
            started_at: Utc::now(),
        };
        deliver(
            self.observer.as_ref(),
            &TraceEvent::Start {
                context: context.clone(),
            },
        );

        let winner = self.table.candidates(&from, &trigger).find(|rule| {
            let feedback = Feedback::reporting(self.observer.as_ref(), &context, rule.to.name());
            rule.guard.check(object, &feedback)
        });

        let Some(rule) = winner else {
            deliver(
                self.observer.as_ref(),
                &TraceEvent::End {
                    context,
                    outcome: Outcome::NotFound,
                },
            );
            return None;
        };

        let staged = if rule.changes_state() {
            self.table
                .cross(object.clone(), &rule.from, &rule.to, |object, state| {
                    self.accessors.apply(object, state)
                })
        } else {
            object.clone()
        };
        let result = rule.fire(&trigger, staged);

        deliver(
            self.observer.as_ref(),
            &TraceEvent::End {
                context,
                outcome: Outcome::Transitioned {
                    to: rule.to.name().to_string(),
                    object: self.accessors.identify(&result),
                },
            },
        );
        Some(result)
    }

    /// Re-evaluate the wildcard rules of the object's state without a new event.
    ///
    /// Lets time-based guards fire on an external tick.
    pub fn tick(&self, object: &O) -> Option<O> {
        self.transition(object, Trigger::Loop)
    }

    /// Rules registered from `state`, wildcard rules first.
    pub fn rules_from<'m>(&'m self, state: &S) -> impl Iterator<Item = &'m Rule<S, A, O>> {
        let state = state.clone();
        let (wildcard, specific): (Vec<_>, Vec<_>) = self
            .table
            .groups()
            .filter(move |(from, _, _)| **from == state)
            .partition(|(_, on, _)| *on == Matcher::Any);
        wildcard
            .into_iter()
            .chain(specific)
            .flat_map(|(_, _, rules)| rules.iter())
    }

    /// Matchers that have at least one rule from `state`.
    pub fn permitted(&self, state: &S) -> Vec<Matcher<A::Kind>> {
        let mut matchers: Vec<Matcher<A::Kind>> = Vec::new();
        for rule in self.rules_from(state) {
            if !matchers.contains(&rule.on) {
                matchers.push(rule.on);
            }
        }
        matchers
    }

    /// Total number of rules in the table.
    pub fn rule_count(&self) -> usize {
        self.table.rule_count()
    }
}
