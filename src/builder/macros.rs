//! Macros for ergonomic machine declarations.

/// Generate a state enum and its `State` implementation.
///
/// # Example
///
/// ```
/// use statewise::state_enum;
/// use statewise::core::State;
///
/// state_enum! {
///     pub enum OrderState {
///         Open,
///         Paid,
///         Closed,
///     }
///     final: [Closed]
/// }
///
/// assert_eq!(OrderState::Paid.name(), "Paid");
/// assert!(OrderState::Closed.is_final());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }
        }
    };
}

/// Generate an action enum, its payload-free kind enum, and the `Action` impl.
///
/// Variants are either unit variants or carry named fields.
///
/// # Example
///
/// ```
/// use statewise::action_enum;
/// use statewise::core::Action;
///
/// action_enum! {
///     pub enum OrderAction => OrderActionKind {
///         Pay { amount: u64 },
///         Cancel,
///     }
/// }
///
/// let pay = OrderAction::Pay { amount: 40 };
/// assert_eq!(pay.kind(), OrderActionKind::Pay);
/// assert_eq!(OrderAction::Cancel.kind(), OrderActionKind::Cancel);
/// ```
#[macro_export]
macro_rules! action_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident => $kind:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $({ $($field:ident : $field_ty:ty),* $(,)? })?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant $({ $($field: $field_ty),* })?
            ),*
        }

        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $kind {
            $($variant),*
        }

        impl $crate::core::Action for $name {
            type Kind = $kind;

            fn kind(&self) -> $kind {
                match self {
                    $(Self::$variant { .. } => $kind::$variant),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Action, State};

    state_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
        final: [Complete]
    }

    action_enum! {
        enum TestAction => TestActionKind {
            Begin,
            Report { progress: u8, note: String },
            Finish,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        let state = TestState::Initial;
        assert_eq!(state.name(), "Initial");
        assert!(!state.is_final());

        let complete = TestState::Complete;
        assert_eq!(complete.name(), "Complete");
        assert!(complete.is_final());
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            pub enum PublicState {
                A,
                B,
            }
            final: [B]
        }

        assert!(PublicState::B.is_final());
    }

    #[test]
    fn state_enum_works_without_final() {
        state_enum! {
            enum MinimalState {
                One,
                Two,
            }
        }

        assert!(!MinimalState::One.is_final());
        assert!(!MinimalState::Two.is_final());
    }

    #[test]
    fn state_enum_serializes() {
        let json = serde_json::to_string(&TestState::Processing).unwrap();
        let back: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TestState::Processing);
    }

    #[test]
    fn action_enum_maps_variants_to_kinds() {
        let report = TestAction::Report {
            progress: 40,
            note: "halfway".to_string(),
        };

        assert_eq!(TestAction::Begin.kind(), TestActionKind::Begin);
        assert_eq!(report.kind(), TestActionKind::Report);
        assert_eq!(TestAction::Finish.kind(), TestActionKind::Finish);
    }

    #[test]
    fn action_enum_keeps_payload() {
        let report = TestAction::Report {
            progress: 40,
            note: "halfway".to_string(),
        };

        match report {
            TestAction::Report { progress, note } => {
                assert_eq!(progress, 40);
                assert_eq!(note, "halfway");
            }
            other => panic!("Expected Report, got {other:?}"),
        }
    }
}
