//! # todolist testing
//!
//! Testing utilities and helpers for the todolist reducer architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//! - [`reduce_with_feedback`], the store's feedback loop without the store
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use todolist_testing::{ReducerTest, SequentialIdGenerator};
//!
//! ReducerTest::new(TodoAppReducer::new())
//!     .with_env(TodoEnvironment::new(Arc::new(SequentialIdGenerator::new())))
//!     .given_state(TodoAppState::default())
//!     .when_action(TodoAction::Create { draft })
//!     .then_state(|state| assert_eq!(state.todos.len(), 1))
//!     .run();
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use todolist_core::Uuid;
use todolist_core::environment::IdGenerator;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{AtomicU64, IdGenerator, Ordering, Uuid};

    /// Predictable id source for deterministic tests
    ///
    /// Hands out `00000000-0000-0000-0000-000000000001`,
    /// `...0002`, and so on.
    ///
    /// # Example
    ///
    /// ```
    /// use todolist_testing::mocks::SequentialIdGenerator;
    /// use todolist_core::environment::IdGenerator;
    /// use todolist_core::Uuid;
    ///
    /// let ids = SequentialIdGenerator::new();
    /// assert_eq!(ids.next_id(), Uuid::from_u128(1));
    /// assert_eq!(ids.next_id(), Uuid::from_u128(2));
    /// ```
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        issued: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator whose first id is 1
        #[must_use]
        pub const fn new() -> Self {
            Self::starting_after(0)
        }

        /// Create a generator whose first id is `last + 1`
        #[must_use]
        pub const fn starting_after(last: u64) -> Self {
            Self {
                issued: AtomicU64::new(last),
            }
        }

        /// Number of the most recently issued id (0 if none yet)
        #[must_use]
        pub fn issued(&self) -> u64 {
            self.issued.load(Ordering::SeqCst)
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> Uuid {
            let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            Uuid::from_u128(u128::from(n))
        }
    }
}


// Re-export commonly used items
pub use mocks::SequentialIdGenerator;
pub use reducer_test::{ReducerTest, assertions, reduce_with_feedback};
