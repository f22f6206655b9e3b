//! Domain types for the todo list.
//!
//! A todo list is an ordered collection of [`Todo`] records. Each record has
//! an opaque id assigned at creation and three user-editable fields. The
//! root state, [`TodoAppState`], owns the collection together with the
//! transient UI state (the add form and per-item edit modes).

use crate::collection::TodoList;
use crate::editable::EditStates;
use crate::error::{PriorityError, TodoError};
use crate::form::{FormAction, FormState};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;
use std::str::FromStr;
use todolist_core::version::Version;
use todolist_macros::{Action, State};
use uuid::Uuid;

/// Unique identifier for a todo item
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Creates a `TodoId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Urgency of a todo. **Lower values are more urgent.**
///
/// `Priority::CRITICAL` (1) outranks `Priority::HIGH` (2), which outranks
/// `Priority::LOW` (3). The derived `Ord` follows the numeric value, so the
/// *minimum* of a set of priorities is the most urgent one; prefer
/// [`Priority::is_more_urgent_than`] over `<` when comparing by hand.
///
/// Any non-zero value is accepted: the three named levels are what the UI
/// offers, not a limit of the model.
///
/// ```
/// use todolist::Priority;
///
/// assert!(Priority::CRITICAL.is_more_urgent_than(Priority::LOW));
/// assert_eq!("2".parse::<Priority>(), Ok(Priority::HIGH));
/// assert!("0".parse::<Priority>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(NonZeroU8);

impl Priority {
    /// Most urgent level (1)
    pub const CRITICAL: Self = Self::level(1);
    /// Second level (2)
    pub const HIGH: Self = Self::level(2);
    /// Least urgent level offered by the UI (3)
    pub const LOW: Self = Self::level(3);

    /// The levels offered by the forms, most urgent first
    pub const LEVELS: [Self; 3] = [Self::CRITICAL, Self::HIGH, Self::LOW];

    const fn level(value: u8) -> Self {
        match NonZeroU8::new(value) {
            Some(value) => Self(value),
            None => Self(NonZeroU8::MIN),
        }
    }

    /// Creates a priority, rejecting zero
    ///
    /// # Errors
    ///
    /// Returns [`PriorityError::Zero`] for `0`.
    pub const fn new(value: u8) -> Result<Self, PriorityError> {
        match NonZeroU8::new(value) {
            Some(value) => Ok(Self(value)),
            None => Err(PriorityError::Zero),
        }
    }

    /// Numeric value (1 = most urgent)
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0.get()
    }

    /// True if `self` should be done before `other`
    #[must_use]
    pub const fn is_more_urgent_than(self, other: Self) -> bool {
        self.0.get() < other.0.get()
    }

    /// UI label of the named levels
    #[must_use]
    pub const fn label(self) -> Option<&'static str> {
        match self.0.get() {
            1 => Some("Ultra-Über"),
            2 => Some("Über"),
            3 => Some("Meh"),
            _ => None,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::CRITICAL
    }
}

impl TryFrom<u8> for Priority {
    type Error = PriorityError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.value()
    }
}

impl FromStr for Priority {
    type Err = PriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s
            .trim()
            .parse()
            .map_err(|_| PriorityError::NotANumber(s.trim().to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => write!(f, "{} ({label})", self.value()),
            None => write!(f, "{}", self.value()),
        }
    }
}

/// A todo's editable fields, without an id
///
/// The add form produces drafts; [`TodoDraft::with_id`] turns one into a
/// complete [`Todo`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoDraft {
    /// Short title, required
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Urgency, defaults to [`Priority::CRITICAL`]
    #[serde(default)]
    pub priority: Priority,
}

impl TodoDraft {
    /// Creates a draft
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority,
        }
    }

    /// Attaches an id, producing a complete todo
    #[must_use]
    pub fn with_id(self, id: TodoId) -> Todo {
        Todo {
            id,
            title: self.title,
            description: self.description,
            priority: self.priority,
        }
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier, fixed at creation
    pub id: TodoId,
    /// Short title
    pub title: String,
    /// Free-form description
    pub description: String,
    /// Urgency (lower is more urgent)
    pub priority: Priority,
}

impl Todo {
    /// The editable fields of this todo
    #[must_use]
    pub fn draft(&self) -> TodoDraft {
        TodoDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
        }
    }
}

/// Root state of the todo app
///
/// `todos` is the single source of truth for the collection. `editing` and
/// `add_form` are transient UI state and never leak into the records.
/// `version` is bumped on every observable change.
#[derive(State, Clone, Debug, Default)]
pub struct TodoAppState {
    /// All todos, in insertion order
    pub todos: TodoList,
    /// Per-item view/edit modes
    pub editing: EditStates,
    /// The "add new todo" form
    pub add_form: FormState,
    /// Outcome of the last collection command that failed (if any)
    pub last_error: Option<TodoError>,
    /// Change stamp
    #[version]
    pub version: Version,
}

impl TodoAppState {
    /// Creates an empty app state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an app state around an existing collection
    #[must_use]
    pub fn with_todos(todos: TodoList) -> Self {
        Self {
            todos,
            ..Self::default()
        }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.get(id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn exists(&self, id: &TodoId) -> bool {
        self.todos.contains(id)
    }

    /// The most urgent todo, `None` when the list is empty
    #[must_use]
    pub fn top_todo(&self) -> Option<&Todo> {
        self.todos.top()
    }
}

/// Actions for the todo app
///
/// Commands ask the collection to change, events record that it did, and
/// the remaining variants are UI intents from the list, its items and the
/// forms.
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    // ========== Commands ==========
    /// Command: Append a new todo built from a draft
    #[command]
    Create {
        /// Fields of the new todo
        draft: TodoDraft,
    },

    /// Command: Replace the fields of an existing todo
    #[command]
    Update {
        /// The todo, carrying the id of the record to replace
        todo: Todo,
    },

    /// Command: Delete a todo (no-op if absent)
    #[command]
    Remove {
        /// Todo to delete
        id: TodoId,
    },

    // ========== Events ==========
    /// Event: Todo was appended
    #[event]
    TodoCreated {
        /// The new todo, id included
        todo: Todo,
    },

    /// Event: Todo fields were replaced in place
    #[event]
    TodoUpdated {
        /// The todo after the update
        todo: Todo,
    },

    /// Event: Todo was deleted
    #[event]
    TodoRemoved {
        /// Deleted todo
        id: TodoId,
    },

    /// Event: An update referenced a missing todo
    #[event]
    TodoNotFound {
        /// The id that was not found
        id: TodoId,
    },

    // ========== UI ==========
    /// Switch an item from viewing to editing
    StartEditing {
        /// Item to edit
        id: TodoId,
    },

    /// Leave editing without saving
    CancelEditing {
        /// Item being edited
        id: TodoId,
    },

    /// The item's "Delete" control; only honored while viewing
    RequestDelete {
        /// Item to delete
        id: TodoId,
    },

    /// Input to the add form
    AddForm(FormAction),

    /// Input to an item's edit form
    EditForm {
        /// Item being edited
        id: TodoId,
        /// The form input
        action: FormAction,
    },
}
