//! State and state-object traits.
//!
//! A machine is defined over two caller types: a closed enumeration of states and an
//! immutable object that records which state it is in. The engine only ever reads the
//! state through an extractor and writes it back through an applier.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// States are plain values; the engine needs equality and hashing to key its
/// transition table and a name for diagnostics.
///
/// # Example
///
/// ```rust
/// use statewise::core::State;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Door {
///     Open,
///     Closed,
///     Locked,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///             Self::Locked => "Locked",
///         }
///     }
/// }
///
/// assert_eq!(Door::Locked.name(), "Locked");
/// assert!(!Door::Locked.is_final());
/// ```
pub trait State: Clone + Eq + Hash + Debug + Send + Sync {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Final states are not expected to have outgoing rules;
    /// [`StateMachine::validate`](crate::machine::StateMachine::validate) reports
    /// any that do.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

/// An immutable domain object that carries its own state.
///
/// Implementing this trait is an alternative to handing three closures to
/// [`MachineBuilder::new`](crate::builder::MachineBuilder::new). Implementations must
/// satisfy `o.with_state(s).state() == s` for every object and state.
pub trait StateObject: Clone {
    type State: State;

    /// Read the state recorded in this object.
    fn state(&self) -> Self::State;

    /// Return a copy of this object with `state` recorded.
    fn with_state(self, state: Self::State) -> Self;

    /// Identify this object in diagnostics.
    fn identify(&self) -> String;
}

pub(crate) type Extractor<S, O> = Box<dyn Fn(&O) -> S + Send + Sync>;
pub(crate) type Applier<S, O> = Box<dyn Fn(O, S) -> O + Send + Sync>;
pub(crate) type Identifier<O> = Box<dyn Fn(&O) -> String + Send + Sync>;

/// The three caller-supplied functions the engine uses to see into an object.
pub(crate) struct Accessors<S, O> {
    extract: Extractor<S, O>,
    apply: Applier<S, O>,
    identify: Identifier<O>,
}

impl<S, O> Accessors<S, O> {
    pub(crate) fn new(
        extract: Extractor<S, O>,
        apply: Applier<S, O>,
        identify: Identifier<O>,
    ) -> Self {
        Self {
            extract,
            apply,
            identify,
        }
    }

    pub(crate) fn state_of(&self, object: &O) -> S {
        (self.extract)(object)
    }

    pub(crate) fn apply(&self, object: O, state: S) -> O {
        (self.apply)(object, state)
    }

    pub(crate) fn identify(&self, object: &O) -> String {
        (self.identify)(object)
    }
}

impl<O> Accessors<O::State, O>
where
    O: StateObject + 'static,
{
    pub(crate) fn for_object() -> Self {
        Self::new(
            Box::new(|object: &O| object.state()),
            Box::new(|object: O, state: O::State| object.with_state(state)),
            Box::new(|object: &O| object.identify()),
        )
    }
}
