//! Action taxonomy.
//!
//! Callers describe events as an enum implementing [`Action`], with an explicit
//! discriminant type used to key the transition table. The engine never inspects an
//! event beyond its kind; it wraps events in a [`Trigger`], which adds the two reserved
//! pseudo-kinds: `Any` and `Loop`.

use std::fmt::{self, Debug};
use std::hash::Hash;

/// A caller-defined event that may trigger a transition.
///
/// `Kind` is a payload-free discriminant: two events of the same kind are offered the
/// same rules. The [`action_enum!`](crate::action_enum) macro generates both enums.
///
/// # Example
///
/// ```rust
/// use statewise::core::Action;
///
/// #[derive(Clone, Debug)]
/// enum DoorAction {
///     Push,
///     Unlock { code: u32 },
/// }
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum DoorActionKind {
///     Push,
///     Unlock,
/// }
///
/// impl Action for DoorAction {
///     type Kind = DoorActionKind;
///
///     fn kind(&self) -> DoorActionKind {
///         match self {
///             Self::Push => DoorActionKind::Push,
///             Self::Unlock { .. } => DoorActionKind::Unlock,
///         }
///     }
/// }
///
/// assert_eq!(DoorAction::Unlock { code: 1234 }.kind(), DoorActionKind::Unlock);
/// ```
pub trait Action: Debug + Send + Sync {
    type Kind: Copy + Eq + Hash + Debug + Send + Sync;

    fn kind(&self) -> Self::Kind;
}

/// The value handed to a machine on dispatch.
#[derive(Clone, Debug, PartialEq)]
pub enum Trigger<A> {
    /// A concrete caller event.
    Event(A),

    /// A trigger offered to wildcard rules only.
    Any(Box<Trigger<A>>),

    /// Re-evaluation of wildcard guards without a new external event.
    Loop,
}

impl<A: Action> Trigger<A> {
    /// Wrap this trigger so that only wildcard rules consider it.
    pub fn wildcard(self) -> Self {
        Trigger::Any(Box::new(self))
    }

    /// Concrete kind used for rule lookup.
    ///
    /// `Any` and `Loop` have no concrete kind, so they only ever reach wildcard rules.
    pub fn kind(&self) -> Option<A::Kind> {
        match self {
            Trigger::Event(event) => Some(event.kind()),
            Trigger::Any(_) | Trigger::Loop => None,
        }
    }

    /// The innermost concrete event, looking through any `Any` wrappers.
    pub fn event(&self) -> Option<&A> {
        match self {
            Trigger::Event(event) => Some(event),
            Trigger::Any(inner) => inner.event(),
            Trigger::Loop => None,
        }
    }

    pub fn is_loop(&self) -> bool {
        matches!(self, Trigger::Loop)
    }
}

impl<A: Action> From<A> for Trigger<A> {
    fn from(event: A) -> Self {
        Trigger::Event(event)
    }
}

/// Which triggers a rule is registered for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Matcher<K> {
    /// Every trigger for the source state; tried before kind rules.
    Any,

    /// Events of one kind.
    Kind(K),
}

impl<K> From<K> for Matcher<K> {
    fn from(kind: K) -> Self {
        Matcher::Kind(kind)
    }
}

impl<K: Debug> fmt::Display for Matcher<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Any => f.write_str("Any"),
            Matcher::Kind(kind) => write!(f, "{kind:?}"),
        }
    }
}
