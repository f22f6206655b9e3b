//! # todolist core
//!
//! Core traits and types for the todolist reducer architecture.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature, stamped with a [`version::Version`]
//! - **Action**: All possible inputs to a reducer (commands, events, UI intents)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Follow-up work described as values, executed by the runtime
//! - **Environment**: Injected dependencies via traits
//!
//! Child features talk to their parents by returning [`effect::Effect::Dispatch`]
//! with an action the parent understands; [`composition`] lifts a child reducer
//! into a parent's state and action types.
//!
//! ## Example
//!
//! ```
//! use todolist_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = CounterState::default();
//! let _ = CounterReducer.reduce(&mut state, CounterAction::Increment, &());
//! assert_eq!(state.count, 1);
//! ```

pub use smallvec::{smallvec, SmallVec};
pub use uuid::Uuid;

/// Reducer composition utilities
pub mod composition;

/// Version stamps for change detection
pub mod version;

/// Action module - common behavior of action enums
///
/// Actions unify commands (requests to change state), events (facts about
/// what happened) and plain UI intents. Usually derived with
/// `#[derive(Action)]` from `todolist-macros`.
pub mod action {
    /// Introspection shared by all action enums
    pub trait Action {
        /// Variant name, used in logs and metrics labels
        fn name(&self) -> &'static str;

        /// Returns true if this action is a command
        fn is_command(&self) -> bool;

        /// Returns true if this action is an event
        fn is_event(&self) -> bool;
    }
}

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
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
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// Effects are returned inline for the common case of zero to four
        /// effects, avoiding a heap allocation per action.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects are values, not execution. The runtime interprets them after the
/// reducer returns.
pub mod effect {
    /// Effect type - describes follow-up work to be executed by the runtime
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Feed an action back into the reducer once the current one returns
        ///
        /// This is how a child component hands data to its parent: the parent
        /// reducer receives the dispatched action on the next turn.
        Dispatch(Action),

        /// Run effects one after another, in order
        Sequential(Vec<Effect<Action>>),
    }

    impl<Action> Effect<Action> {
        /// Shorthand for [`Effect::Dispatch`]
        #[must_use]
        pub const fn dispatch(action: Action) -> Self {
            Self::Dispatch(action)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Self>) -> Self {
            Self::Sequential(effects)
        }

        /// Returns true if this effect does nothing when executed
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Self::None => true,
                Self::Dispatch(_) => false,
                Self::Sequential(effects) => effects.iter().all(Self::is_none),
            }
        }

        /// Lift an effect into a parent's action type
        ///
        /// ```
        /// use todolist_core::effect::Effect;
        ///
        /// let child: Effect<u8> = Effect::chain(vec![Effect::dispatch(1), Effect::None]);
        /// let parent: Effect<String> = child.map(|n| format!("child:{n}"));
        /// assert_eq!(
        ///     parent,
        ///     Effect::chain(vec![Effect::dispatch("child:1".to_string()), Effect::None])
        /// );
        /// ```
        #[must_use]
        pub fn map<B, F>(self, f: F) -> Effect<B>
        where
            F: Fn(Action) -> B,
        {
            self.map_with(&f)
        }

        fn map_with<B, F>(self, f: &F) -> Effect<B>
        where
            F: Fn(Action) -> B,
        {
            match self {
                Self::None => Effect::None,
                Self::Dispatch(action) => Effect::Dispatch(f(action)),
                Self::Sequential(effects) => {
                    Effect::Sequential(effects.into_iter().map(|e| e.map_with(f)).collect())
                },
            }
        }

        /// Flatten into the dispatched actions, in execution order
        #[must_use]
        pub fn into_actions(self) -> Vec<Action> {
            let mut actions = Vec::new();
            self.collect_into(&mut actions);
            actions
        }

        fn collect_into(self, out: &mut Vec<Action>) {
            match self {
                Self::None => {},
                Self::Dispatch(action) => out.push(action),
                Self::Sequential(effects) => {
                    for effect in effects {
                        effect.collect_into(out);
                    }
                },
            }
        }
    }
}

/// State module - traits every store-managed state implements
pub mod state {
    use super::version::Version;

    /// State that carries a version stamp
    ///
    /// Usually derived with `#[derive(State)]` and a `#[version]` field.
    /// The runtime publishes the version after each action so observers can
    /// tell whether anything changed.
    pub trait Versioned {
        /// Current version of this state
        fn version(&self) -> Version;
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use uuid::Uuid;

    /// Source of fresh, collision-free identifiers
    ///
    /// # Examples
    ///
    /// ```
    /// use todolist_core::environment::{IdGenerator, UuidGenerator};
    ///
    /// let ids = UuidGenerator;
    /// assert_ne!(ids.next_id(), ids.next_id());
    /// ```
    pub trait IdGenerator: Send + Sync {
        /// Produce a new identifier, never returned before
        fn next_id(&self) -> Uuid;
    }

    /// Production id source backed by random v4 UUIDs
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UuidGenerator;

    impl IdGenerator for UuidGenerator {
        fn next_id(&self) -> Uuid {
            Uuid::new_v4()
        }
    }
}
