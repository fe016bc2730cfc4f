//! Transition table and hook registries.

use crate::core::{Action, Guard, Matcher, State, Trigger};
use std::collections::HashMap;

/// Pure transform run when leaving or entering a state.
pub type Hook<O> = Box<dyn Fn(O) -> O + Send + Sync>;

/// Callback of a kind rule: receives the concrete event.
pub type EventCallback<A, O> = Box<dyn Fn(&A, O) -> O + Send + Sync>;

/// Callback of a wildcard rule: receives the trigger that was dispatched.
pub type AnyCallback<A, O> = Box<dyn Fn(&Trigger<A>, O) -> O + Send + Sync>;

pub(crate) enum Callback<A, O> {
    Identity,
    Event(EventCallback<A, O>),
    Any(AnyCallback<A, O>),
}

/// A single guarded transition.
pub struct Rule<S, A: Action, O> {
    pub(crate) on: Matcher<A::Kind>,
    pub(crate) from: S,
    pub(crate) to: S,
    pub(crate) guard: Guard<O>,
    pub(crate) callback: Callback<A, O>,
}

impl<S: State, A: Action, O> Rule<S, A, O> {
    pub fn on(&self) -> Matcher<A::Kind> {
        self.on
    }

    pub fn from(&self) -> &S {
        &self.from
    }

    pub fn to(&self) -> &S {
        &self.to
    }

    pub fn guard(&self) -> &Guard<O> {
        &self.guard
    }

    /// Whether firing this rule moves the object to another state.
    pub fn changes_state(&self) -> bool {
        self.from != self.to
    }

    /// Run the rule's callback.
    ///
    /// # Panics
    ///
    /// Panics if a kind rule is handed a trigger of a different kind. The dispatcher
    /// never does this; reaching it means the table was bypassed.
    pub(crate) fn fire(&self, trigger: &Trigger<A>, object: O) -> O {
        match &self.callback {
            Callback::Identity => object,
            Callback::Any(callback) => callback(trigger, object),
            Callback::Event(callback) => match (self.on, trigger) {
                (Matcher::Kind(kind), Trigger::Event(event)) if event.kind() == kind => {
                    callback(event, object)
                }
                _ => panic!(
                    "rule registered for {} from '{}' invoked with {:?}",
                    self.on,
                    self.from.name(),
                    trigger
                ),
            },
        }
    }
}

/// Rules keyed by source state and matcher, plus per-state hook lists.
///
/// Populated by [`MachineBuilder`](crate::builder::MachineBuilder) and frozen inside a
/// [`StateMachine`](crate::machine::StateMachine).
pub(crate) struct TransitionTable<S, A: Action, O> {
    rules: HashMap<(S, Matcher<A::Kind>), Vec<Rule<S, A, O>>>,
    on_entry: HashMap<S, Vec<Hook<O>>>,
    on_exit: HashMap<S, Vec<Hook<O>>>,
}

impl<S: State, A: Action, O> TransitionTable<S, A, O> {
    pub(crate) fn new() -> Self {
        Self {
            rules: HashMap::new(),
            on_entry: HashMap::new(),
            on_exit: HashMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, rule: Rule<S, A, O>) {
        self.rules
            .entry((rule.from.clone(), rule.on))
            .or_default()
            .push(rule);
    }

    pub(crate) fn add_entry_hook(&mut self, state: S, hook: Hook<O>) {
        self.on_entry.entry(state).or_default().push(hook);
    }

    pub(crate) fn add_exit_hook(&mut self, state: S, hook: Hook<O>) {
        self.on_exit.entry(state).or_default().push(hook);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub(crate) fn rule_count(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    /// Rules registered under exactly `(from, on)`, in registration order.
    pub(crate) fn rules_for(&self, from: &S, on: Matcher<A::Kind>) -> &[Rule<S, A, O>] {
        self.rules
            .get(&(from.clone(), on))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Dispatch candidates: wildcard rules first, then rules for the trigger's kind.
    pub(crate) fn candidates<'t>(
        &'t self,
        from: &S,
        trigger: &Trigger<A>,
    ) -> impl Iterator<Item = &'t Rule<S, A, O>> {
        let wildcard = self.rules_for(from, Matcher::Any);
        let specific: &[Rule<S, A, O>] = match trigger.kind() {
            Some(kind) => self.rules_for(from, Matcher::Kind(kind)),
            None => &[],
        };
        wildcard.iter().chain(specific.iter())
    }

    pub(crate) fn groups(
        &self,
    ) -> impl Iterator<Item = (&S, Matcher<A::Kind>, &[Rule<S, A, O>])> {
        self.rules
            .iter()
            .map(|((from, on), rules)| (from, *on, rules.as_slice()))
    }

    pub(crate) fn rules(&self) -> impl Iterator<Item = &Rule<S, A, O>> {
        self.rules.values().flatten()
    }

    pub(crate) fn entry_hooks(&self, state: &S) -> &[Hook<O>] {
        self.on_entry.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn exit_hooks(&self, state: &S) -> &[Hook<O>] {
        self.on_exit.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn entry_states(&self) -> impl Iterator<Item = &S> {
        self.on_entry.keys()
    }

    pub(crate) fn exit_states(&self) -> impl Iterator<Item = &S> {
        self.on_exit.keys()
    }

    /// Run exit hooks of `from`, then entry hooks of `to`, then record `to`.
    pub(crate) fn cross(&self, object: O, from: &S, to: &S, apply: impl Fn(O, S) -> O) -> O {
        let object = self
            .exit_hooks(from)
            .iter()
            .fold(object, |object, hook| hook(object));
        let object = self
            .entry_hooks(to)
            .iter()
            .fold(object, |object, hook| hook(object));
        apply(object, to.clone())
    }
}
