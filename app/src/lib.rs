//! A todo list with priorities and inline editing.
//!
//! Todos have a title, a description and a [`Priority`] (lower is more
//! urgent). The app keeps them in insertion order, shows the most urgent
//! one on top, and lets each item switch between viewing and editing.
//!
//! - [`TodoList`]: copy-on-write collection with create/update/remove
//! - [`top::top_todo`]: first of the most urgent todos
//! - [`form`]: the add/edit form feature
//! - [`editable`]: per-item view/edit modes
//! - [`TodoAppReducer`]: the root reducer tying them together
//! - [`view`]: text rendering of a state snapshot
//!
//! # Quick Start
//!
//! ```no_run
//! use todolist::{Priority, TodoAction, TodoAppReducer, TodoAppState, TodoDraft, TodoEnvironment};
//! use todolist_core::environment::UuidGenerator;
//! use todolist_runtime::Store;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = TodoEnvironment::new(Arc::new(UuidGenerator));
//! let store = Store::new(TodoAppState::new(), TodoAppReducer::new(), env);
//!
//! store
//!     .send(TodoAction::Create {
//!         draft: TodoDraft::new("Buy milk", "", Priority::HIGH),
//!     })
//!     .await?;
//!
//! let top = store.state(|s| s.top_todo().map(|t| t.title.clone())).await;
//! assert_eq!(top.as_deref(), Some("Buy milk"));
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod collection;
pub mod config;
pub mod editable;
pub mod error;
pub mod form;
pub mod reducer;
pub mod top;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use collection::TodoList;
pub use error::{ConfigError, FormError, PriorityError, TodoError};
pub use reducer::{TodoAppReducer, TodoEnvironment};
pub use types::{Priority, Todo, TodoAction, TodoAppState, TodoDraft, TodoId};
