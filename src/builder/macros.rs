//! Macros for ergonomic state declaration.

/// Declare a mode enumeration and implement [`State`](crate::core::State)
/// for it.
///
/// Derives `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Debug`, `Serialize`
/// and `Deserialize`, and adds an `ALL` constant listing every variant in
/// declaration order.
///
/// # Example
///
/// ```
/// use modeshift::state_enum;
/// use modeshift::core::State;
///
/// state_enum! {
///     pub enum RobotMode {
///         Disabled,
///         EStop,
///         Autonomous,
///         Teleop,
///     }
/// }
///
/// assert_eq!(RobotMode::EStop.name(), "EStop");
/// assert_eq!(RobotMode::ALL.len(), 4);
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
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;
    use std::collections::HashSet;

    state_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Processing.name(), "Processing");
        assert_eq!(TestState::Complete.name(), "Complete");
    }

    #[test]
    fn state_enum_lists_all_variants_in_order() {
        assert_eq!(
            TestState::ALL,
            &[
                TestState::Initial,
                TestState::Processing,
                TestState::Complete
            ]
        );
    }

    #[test]
    fn state_enum_values_are_hashable() {
        let set: HashSet<TestState> = TestState::ALL.iter().copied().collect();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            pub enum PublicState {
                A,
                B,
            }
        }

        let _state = PublicState::A;
        assert_eq!(PublicState::ALL.len(), 2);
    }
}
