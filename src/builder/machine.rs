//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::{Accessors, Action, Guard, Matcher, State, StateObject, Trigger};
use crate::machine::{Callback, Rule, StateMachine, TransitionTable};
use crate::observe::{Observer, TracingObserver};
use std::sync::Arc;

/// Builder for constructing state machines with a fluent API.
///
/// Rules are declared per source state through [`from_state`](Self::from_state).
/// [`build`](Self::build) freezes the table; the builder cannot be used afterwards.
pub struct MachineBuilder<S: State, A: Action, O> {
    name: String,
    accessors: Accessors<S, O>,
    table: TransitionTable<S, A, O>,
    observer: Arc<dyn Observer>,
}

impl<S, A, O> MachineBuilder<S, A, O>
where
    S: State + 'static,
    A: Action + 'static,
    O: Clone + 'static,
{
    /// Create a builder from the three object accessors.
    ///
    /// `applier` must record the state so that `extractor(applier(o, s)) == s`.
    pub fn new<E, P, I>(name: impl Into<String>, extractor: E, applier: P, identifier: I) -> Self
    where
        E: Fn(&O) -> S + Send + Sync + 'static,
        P: Fn(O, S) -> O + Send + Sync + 'static,
        I: Fn(&O) -> String + Send + Sync + 'static,
    {
        Self::with_accessors(
            name.into(),
            Accessors::new(Box::new(extractor), Box::new(applier), Box::new(identifier)),
        )
    }

    fn with_accessors(name: String, accessors: Accessors<S, O>) -> Self {
        Self {
            name,
            accessors,
            table: TransitionTable::new(),
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the default [`TracingObserver`].
    pub fn observer(&mut self, observer: Arc<dyn Observer>) -> &mut Self {
        self.observer = observer;
        self
    }

    /// Open a scope declaring hooks and rules for `state`.
    pub fn from_state(&mut self, state: S) -> StateScope<'_, S, A, O> {
        StateScope {
            builder: self,
            from: state,
        }
    }

    /// Freeze the definition into an immutable machine.
    pub fn build(self) -> Result<StateMachine<S, A, O>, BuildError> {
        if self.name.trim().is_empty() {
            return Err(BuildError::BlankName);
        }
        if self.table.is_empty() {
            return Err(BuildError::NoTransitions { machine: self.name });
        }

        tracing::debug!(
            machine = %self.name,
            rules = self.table.rule_count(),
            "state machine built"
        );

        Ok(StateMachine {
            name: self.name,
            accessors: self.accessors,
            table: self.table,
            observer: self.observer,
        })
    }
}

impl<A, O> MachineBuilder<O::State, A, O>
where
    A: Action + 'static,
    O: StateObject + 'static,
{
    /// Create a builder for objects that carry their state via [`StateObject`].
    pub fn for_objects(name: impl Into<String>) -> Self {
        Self::with_accessors(name.into(), Accessors::for_object())
    }
}

/// Fluent scope bound to one source state.
///
/// Every call appends to the builder's table in call order; that order is the
/// tie-break among rules that could both fire.
pub struct StateScope<'b, S: State, A: Action, O> {
    builder: &'b mut MachineBuilder<S, A, O>,
    from: S,
}

impl<'b, S, A, O> StateScope<'b, S, A, O>
where
    S: State + 'static,
    A: Action + 'static,
    O: Clone + 'static,
{
    /// Append a transform run whenever a rule moves an object into this state.
    pub fn on_entry<F>(self, transform: F) -> Self
    where
        F: Fn(O) -> O + Send + Sync + 'static,
    {
        self.builder
            .table
            .add_entry_hook(self.from.clone(), Box::new(transform));
        self
    }

    /// Append a transform run whenever a rule moves an object out of this state.
    pub fn on_exit<F>(self, transform: F) -> Self
    where
        F: Fn(O) -> O + Send + Sync + 'static,
    {
        self.builder
            .table
            .add_exit_hook(self.from.clone(), Box::new(transform));
        self
    }

    /// Unconditional rule that only changes the state.
    pub fn permit(self, on: impl Into<Matcher<A::Kind>>, to: S) -> Self {
        self.add(on.into(), to, Guard::always(), Callback::Identity)
    }

    /// Guarded rule that only changes the state.
    pub fn permit_if(self, on: impl Into<Matcher<A::Kind>>, to: S, guard: Guard<O>) -> Self {
        self.add(on.into(), to, guard, Callback::Identity)
    }

    /// Unconditional rule whose callback reads the event.
    pub fn permit_with<F>(self, kind: A::Kind, to: S, callback: F) -> Self
    where
        F: Fn(&A, O) -> O + Send + Sync + 'static,
    {
        self.add(
            Matcher::Kind(kind),
            to,
            Guard::always(),
            Callback::Event(Box::new(callback)),
        )
    }

    /// Guarded rule whose callback reads the event.
    pub fn permit_if_with<F>(self, kind: A::Kind, to: S, guard: Guard<O>, callback: F) -> Self
    where
        F: Fn(&A, O) -> O + Send + Sync + 'static,
    {
        self.add(
            Matcher::Kind(kind),
            to,
            guard,
            Callback::Event(Box::new(callback)),
        )
    }

    /// Unconditional wildcard rule; the callback receives the dispatched trigger.
    pub fn permit_any_with<F>(self, to: S, callback: F) -> Self
    where
        F: Fn(&Trigger<A>, O) -> O + Send + Sync + 'static,
    {
        self.add(
            Matcher::Any,
            to,
            Guard::always(),
            Callback::Any(Box::new(callback)),
        )
    }

    /// Guarded wildcard rule; the callback receives the dispatched trigger.
    pub fn permit_any_if_with<F>(self, to: S, guard: Guard<O>, callback: F) -> Self
    where
        F: Fn(&Trigger<A>, O) -> O + Send + Sync + 'static,
    {
        self.add(Matcher::Any, to, guard, Callback::Any(Box::new(callback)))
    }

    fn add(
        self,
        on: Matcher<A::Kind>,
        to: S,
        guard: Guard<O>,
        callback: Callback<A, O>,
    ) -> Self {
        self.builder.table.insert(Rule {
            on,
            from: self.from.clone(),
            to,
            guard,
            callback,
        });
        self
    }
}
