//! Per-item view/edit modes.
//!
//! Every todo is either being viewed or being edited. The mode is UI state
//! only, kept in [`EditStates`] beside the collection and keyed by id, so the
//! records themselves never carry an "editing" flag. An id with no entry is
//! in [`EditMode::Viewing`].

use crate::form::FormState;
use crate::types::{Todo, TodoId};
use std::collections::HashMap;

/// Mode of a single item
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EditMode {
    /// Showing the todo with its "Edit" and "Delete" controls
    #[default]
    Viewing,
    /// Showing an edit form seeded with the todo's fields
    Editing(FormState),
}

static VIEWING: EditMode = EditMode::Viewing;

/// Modes of all items, keyed by id
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditStates {
    modes: HashMap<TodoId, EditMode>,
}

impl EditStates {
    /// Creates a table with every item viewing
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode of an item
    #[must_use]
    pub fn mode(&self, id: &TodoId) -> &EditMode {
        self.modes.get(id).unwrap_or(&VIEWING)
    }

    /// True if the item is being edited
    #[must_use]
    pub fn is_editing(&self, id: &TodoId) -> bool {
        matches!(self.mode(id), EditMode::Editing(_))
    }

    /// Number of items being edited
    #[must_use]
    pub fn editing_count(&self) -> usize {
        self.modes.len()
    }

    /// Viewing → editing, seeding the form with the todo's fields
    ///
    /// Returns `false` (and changes nothing) if the item is already being
    /// edited.
    pub fn start(&mut self, todo: &Todo) -> bool {
        if self.is_editing(&todo.id) {
            return false;
        }
        self.modes
            .insert(todo.id, EditMode::Editing(FormState::for_todo(todo)));
        true
    }

    /// Editing → viewing, discarding the form
    ///
    /// Returns `false` if the item was not being edited.
    pub fn cancel(&mut self, id: &TodoId) -> bool {
        self.modes.remove(id).is_some()
    }

    /// The edit form of an item being edited
    pub fn form_mut(&mut self, id: &TodoId) -> Option<&mut FormState> {
        match self.modes.get_mut(id) {
            Some(EditMode::Editing(form)) => Some(form),
            _ => None,
        }
    }

    /// Editing → viewing after a save, or when the item left the collection
    pub fn finish(&mut self, id: &TodoId) {
        self.modes.remove(id);
    }
}
