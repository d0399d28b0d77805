//! # Roombook Core
//!
//! Core traits and types for the Roombook client architecture.
//!
//! Roombook is the client-side core of a meeting-room reservation service.
//! Every feature (session, navigation guard, rooms, history, auth) is built
//! from the same four pieces:
//!
//! - **State**: owned domain data for a feature
//! - **Action**: all possible inputs to a reducer — commands (intent) and
//!   events (facts, usually a reduced server response)
//! - **Reducer**: pure function `(State, Action, Environment) → Effects`
//! - **Effect**: side effect *descriptions* (not execution)
//!
//! Reducers never perform I/O. A reducer that needs the backend returns an
//! [`effect::Effect::Future`] describing the call; the runtime store executes
//! it and feeds the resulting action back in. This keeps every status-code
//! dispatch and every state transition a plain function of its inputs,
//! testable without a network.
//!
//! ## Example
//!
//! ```ignore
//! use roombook_core::{effect::Effect, reducer::Reducer, SmallVec};
//!
//! impl Reducer for HistoryReducer {
//!     type State = HistoryState;
//!     type Action = HistoryAction;
//!     type Environment = HistoryEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut HistoryState,
//!         action: HistoryAction,
//!         env: &HistoryEnvironment,
//!     ) -> SmallVec<[Effect<HistoryAction>; 4]> {
//!         // validate commands, apply events, describe requests
//!         SmallVec::new()
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Reducer module - the core trait for feature logic
///
/// Reducers contain all client logic: command validation, event application,
/// and the decision of which effects to issue. They are deterministic given
/// `(state, action, environment)`.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for feature logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: the domain state this reducer operates on
    /// - `Action`: the action type this reducer processes
    /// - `Environment`: the injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for SessionReducer {
    ///     type State = SessionState;
    ///     type Action = SessionAction;
    ///     type Environment = SessionEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut SessionState,
    ///         action: SessionAction,
    ///         env: &SessionEnvironment,
    ///     ) -> SmallVec<[Effect<SessionAction>; 4]> {
    ///         match action {
    ///             SessionAction::Resolve => {
    ///                 // describe the identity fetch
    ///                 smallvec![/* Effect::Future(..) */]
    ///             }
    ///             _ => SmallVec::new(),
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action (commands may be rejected)
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed by the runtime
        ///
        /// Most actions produce zero or one effect, so the return type is a
        /// [`SmallVec`] that stays on the stack for the common case.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - side effect descriptions
///
/// Effects describe side effects to be performed by the runtime store.
/// They are values (not execution) and compose via [`effect::Effect::merge`]
/// and [`effect::Effect::chain`].
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what
    /// should happen, returned from reducers and executed by the Store
    /// runtime. An effect may produce a follow-up action (the feedback loop):
    /// a network call described by [`Effect::Future`] resolves to the event
    /// action carrying the server's outcome.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: the action type that effects can produce
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action (for timeouts)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into
        /// the reducer. Every backend request in the client is one of these:
        /// the future issues the call, reduces the response into an outcome,
        /// and returns the matching event action.
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }
    }
}
