//! # todolist runtime
//!
//! The [`Store`] owns a feature's state and is the only place it changes.
//!
//! ## Core Components
//!
//! - **Store**: holds state, reducer and environment; serializes actions
//! - **Feedback loop**: actions dispatched by effects are reduced before `send` returns
//! - **Change notification**: the state [`Version`] is published on a watch channel
//!
//! ## Example
//!
//! ```ignore
//! use todolist_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use todolist_core::{action::Action, reducer::Reducer, state::Versioned, version::Version};
use tokio::sync::{RwLock, broadcast, watch};

/// Metric names and descriptions
pub mod metrics;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Effects kept dispatching actions past the configured limit
        ///
        /// State changes made before the limit was hit are kept; the
        /// remaining queued actions are dropped.
        #[error("Effect feedback exceeded {limit} actions")]
        FeedbackLimitExceeded {
            /// The configured `max_feedback_actions`
            limit: usize,
        },
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use todolist_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_max_feedback_actions(16)
///     .with_broadcast_capacity(64);
/// assert_eq!(config.max_feedback_actions, 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of effect-dispatched actions handled by one `send`
    pub max_feedback_actions: usize,
    /// Number of actions buffered for each action subscriber
    pub broadcast_capacity: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(max_feedback_actions: usize, broadcast_capacity: usize) -> Self {
        Self {
            max_feedback_actions,
            broadcast_capacity,
        }
    }

    /// Set the feedback limit
    #[must_use]
    pub const fn with_max_feedback_actions(mut self, limit: usize) -> Self {
        self.max_feedback_actions = limit;
        self
    }

    /// Set the action broadcast capacity (minimum 1)
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = if capacity == 0 { 1 } else { capacity };
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_feedback_actions: 64,
            broadcast_capacity: 16,
        }
    }
}

/// Store module - the runtime coordinator
pub mod store {
    use super::{
        Action, Arc, AtomicBool, Ordering, Reducer, RwLock, StoreConfig, StoreError, VecDeque,
        Version, Versioned, broadcast, metrics, watch,
    };

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`, written only by the reducer)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect feedback (dispatched actions are reduced in order)
    ///
    /// Cloning a store is cheap and yields a handle to the same state.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        config: StoreConfig,
        shutdown: Arc<AtomicBool>,
        /// Every action dispatched by an effect is broadcast here.
        action_broadcast: broadcast::Sender<A>,
        /// Latest state version; updated only when it changes.
        changes: Arc<watch::Sender<Version>>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        S: Versioned,
        A: Action + Clone,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
            let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));
            let (changes, _) = watch::channel(initial_state.version());

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                config,
                shutdown: Arc::new(AtomicBool::new(false)),
                action_broadcast,
                changes: Arc::new(changes),
            }
        }

        /// Send an action to the store
        ///
        /// This method:
        /// 1. Acquires the write lock on state
        /// 2. Calls the reducer with (state, action, environment)
        /// 3. Reduces every action dispatched by the returned effects, in
        ///    order, until none are left
        /// 4. Publishes the new version if it changed
        ///
        /// No other `send` interleaves with these steps.
        ///
        /// # Returns
        ///
        /// The state version after the action and its feedback were applied.
        ///
        /// # Errors
        ///
        /// - [`StoreError::ShutdownInProgress`] if [`Store::shutdown`] was called
        /// - [`StoreError::FeedbackLimitExceeded`] if effects dispatched more
        ///   than `max_feedback_actions` actions
        #[tracing::instrument(skip_all, fields(action = action.name()), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<Version, StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                ::metrics::counter!(metrics::REJECTED_ACTIONS_TOTAL).increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            ::metrics::counter!(metrics::ACTIONS_TOTAL, "action" => action.name()).increment(1);

            let mut state = self.state.write().await;
            let before = state.version();
            let outcome = self.run(&mut state, action);
            let after = state.version();
            drop(state);

            if after != before {
                tracing::debug!(%before, %after, "State changed");
                self.changes.send_replace(after);
            }

            outcome.map(|()| after)
        }

        /// Drain the action queue against the locked state
        fn run(&self, state: &mut S, action: A) -> Result<(), StoreError> {
            let limit = self.config.max_feedback_actions;
            let mut queue = VecDeque::from([action]);
            let mut feedback = 0usize;

            while let Some(action) = queue.pop_front() {
                let name = action.name();
                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(state, action, &self.environment);
                ::metrics::histogram!(metrics::REDUCER_DURATION_SECONDS)
                    .record(start.elapsed().as_secs_f64());

                tracing::trace!(action = name, effects = effects.len(), "Reducer completed");

                for next in effects.into_iter().flat_map(|effect| effect.into_actions()) {
                    feedback += 1;
                    if feedback > limit {
                        tracing::error!(limit, last = name, "Effect feedback limit exceeded");
                        ::metrics::counter!(metrics::FEEDBACK_LIMIT_TOTAL).increment(1);
                        return Err(StoreError::FeedbackLimitExceeded { limit });
                    }

                    tracing::debug!(from = name, to = next.name(), "Dispatching feedback action");
                    ::metrics::counter!(metrics::FEEDBACK_ACTIONS_TOTAL).increment(1);
                    // No subscribers is fine
                    let _ = self.action_broadcast.send(next.clone());
                    queue.push_back(next);
                }
            }

            Ok(())
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let count = store.state(|s| s.todos.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        /// Current state version
        pub async fn version(&self) -> Version {
            self.state.read().await.version()
        }

        /// Subscribe to state version changes
        ///
        /// The receiver only observes a new value when an action actually
        /// changed the state; use [`watch::Receiver::has_changed`] to decide
        /// whether derived output needs to be recomputed.
        #[must_use]
        pub fn subscribe_changes(&self) -> watch::Receiver<Version> {
            self.changes.subscribe()
        }

        /// Subscribe to every action dispatched by effects
        ///
        /// Actions passed directly to [`Store::send`] are not broadcast.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Stop accepting actions
        ///
        /// Every later [`Store::send`] fails with [`StoreError::ShutdownInProgress`].
        pub fn shutdown(&self) {
            if !self.shutdown.swap(true, Ordering::AcqRel) {
                tracing::info!("Store shut down");
            }
        }

        /// Returns true once [`Store::shutdown`] was called
        #[must_use]
        pub fn is_shutdown(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                config: self.config,
                shutdown: Arc::clone(&self.shutdown),
                action_broadcast: self.action_broadcast.clone(),
                changes: Arc::clone(&self.changes),
            }
        }
    }

    impl<S, A, E, R> std::fmt::Debug for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Store")
                .field("config", &self.config)
                .field("shutdown", &self.shutdown.load(Ordering::Relaxed))
                .finish_non_exhaustive()
        }
    }
}

pub use store::Store;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.max_feedback_actions, 64);
        assert_eq!(config.broadcast_capacity, 16);
    }

    #[test]
    fn broadcast_capacity_has_floor() {
        let config = StoreConfig::default().with_broadcast_capacity(0);
        assert_eq!(config.broadcast_capacity, 1);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            StoreError::FeedbackLimitExceeded { limit: 3 }.to_string(),
            "Effect feedback exceeded 3 actions"
        );
        assert_eq!(StoreError::ShutdownInProgress.to_string(), "Store is shutting down");
    }
}
