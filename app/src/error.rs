//! Error types for the todo domain.

use crate::types::TodoId;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of collection operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// An update referenced an id that is not in the collection
    #[error("Todo with ID {id} not found")]
    NotFound {
        /// The missing id
        id: TodoId,
    },

    /// A record carried the nil UUID as its id
    #[error("Todo ID must not be nil")]
    NilId,

    /// A collection was built from records sharing an id
    #[error("Todo with ID {id} appears more than once")]
    DuplicateId {
        /// The repeated id
        id: TodoId,
    },
}

/// Invalid priority input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriorityError {
    /// Priorities start at 1
    #[error("Priority must be at least 1")]
    Zero,

    /// Not a number in `1..=255`
    #[error("Priority must be a number between 1 and 255, got `{0}`")]
    NotANumber(String),
}

/// Rejected form input or submission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Submitted with a blank title
    #[error("Title cannot be empty")]
    BlankTitle,

    /// Input name is not one of the form's fields
    #[error("Unknown field `{0}` (expected title, description or priority)")]
    UnknownField(String),

    /// Priority input could not be parsed
    #[error(transparent)]
    InvalidPriority(#[from] PriorityError),
}

/// Failures while loading configuration or the initial todos
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The initial-todos file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The initial-todos file is not a JSON array of todos
    #[error("Invalid initial todos: {0}")]
    Parse(#[from] serde_json::Error),

    /// The initial todos do not form a valid collection
    #[error("Invalid initial todos: {0}")]
    Seed(#[from] TodoError),
}
