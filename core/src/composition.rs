//! Reducer composition utilities
//!
//! [`scope_reducer`] embeds a child reducer, written against its own small
//! state, action and environment types, into a parent feature. The scoped
//! reducer:
//!
//! - focuses on the child's slice of the parent state,
//! - only reacts to parent actions that wrap a child action,
//! - wraps every action the child dispatches back into the parent type.
//!
//! # Examples
//!
//! ```
//! use todolist_core::composition::scope_reducer;
//! use todolist_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i32,
//! }
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum CounterAction {
//!     Increment,
//!     Overflowed,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut CounterState, action: CounterAction, _env: &()) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         match action {
//!             CounterAction::Increment if state.count == 1 => {
//!                 state.count = 0;
//!                 smallvec![Effect::dispatch(CounterAction::Overflowed)]
//!             }
//!             CounterAction::Increment => {
//!                 state.count += 1;
//!                 smallvec![Effect::None]
//!             }
//!             CounterAction::Overflowed => smallvec![Effect::None],
//!         }
//!     }
//! }
//!
//! #[derive(Clone, Debug, Default)]
//! struct AppState {
//!     counter: CounterState,
//! }
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum AppAction {
//!     Counter(CounterAction),
//!     Other,
//! }
//!
//! fn counter(state: &mut AppState) -> &mut CounterState {
//!     &mut state.counter
//! }
//!
//! fn unwrap_counter(action: AppAction) -> Option<CounterAction> {
//!     match action {
//!         AppAction::Counter(inner) => Some(inner),
//!         AppAction::Other => None,
//!     }
//! }
//!
//! fn no_env(_: &()) -> &() {
//!     &()
//! }
//!
//! let scoped = scope_reducer(CounterReducer, counter, unwrap_counter, AppAction::Counter, no_env);
//!
//! let mut state = AppState::default();
//! let _ = scoped.reduce(&mut state, AppAction::Counter(CounterAction::Increment), &());
//! assert_eq!(state.counter.count, 1);
//!
//! let effects = scoped.reduce(&mut state, AppAction::Counter(CounterAction::Increment), &());
//! assert_eq!(
//!     effects.into_iter().flat_map(Effect::into_actions).collect::<Vec<_>>(),
//!     vec![AppAction::Counter(CounterAction::Overflowed)]
//! );
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Scopes a child reducer into a parent state, action, and environment.
///
/// # Arguments
///
/// - `reducer`: the child reducer
/// - `state`: lens from the parent state to the child's slice
/// - `extract`: returns the child action wrapped in a parent action, if any
/// - `embed`: wraps a child action into the parent action type
/// - `environment`: projects the parent environment onto the child's
#[must_use]
pub fn scope_reducer<S, A, E, R>(
    reducer: R,
    state: fn(&mut S) -> &mut R::State,
    extract: fn(A) -> Option<R::Action>,
    embed: fn(R::Action) -> A,
    environment: fn(&E) -> &R::Environment,
) -> ScopedReducer<S, A, E, R>
where
    R: Reducer,
{
    ScopedReducer {
        reducer,
        state,
        extract,
        embed,
        environment,
    }
}

/// A reducer that runs a child reducer on a slice of a larger state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, A, E, R>
where
    R: Reducer,
{
    reducer: R,
    state: fn(&mut S) -> &mut R::State,
    extract: fn(A) -> Option<R::Action>,
    embed: fn(R::Action) -> A,
    environment: fn(&E) -> &R::Environment,
}

impl<S, A, E, R> Reducer for ScopedReducer<S, A, E, R>
where
    R: Reducer,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let Some(child_action) = (self.extract)(action) else {
            return SmallVec::new();
        };

        let child_state = (self.state)(state);
        let child_env = (self.environment)(env);

        self.reducer
            .reduce(child_state, child_action, child_env)
            .into_iter()
            .map(|effect| effect.map(self.embed))
            .collect()
    }
}

impl<S, A, E, R> std::fmt::Debug for ScopedReducer<S, A, E, R>
where
    R: Reducer + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedReducer")
            .field("reducer", &self.reducer)
            .finish_non_exhaustive()
    }
}
