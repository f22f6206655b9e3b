//! The todo collection.
//!
//! [`TodoList`] is a copy-on-write sequence: every change builds a new
//! backing slice and leaves the old one untouched. Two lists that share a
//! backing slice ([`TodoList::ptr_eq`]) are guaranteed equal, which is how
//! views decide cheaply that nothing changed. An operation that finds
//! nothing to change returns `None` and allocates nothing.

use crate::error::TodoError;
use crate::top::top_todo;
use crate::types::{Todo, TodoId};
use std::collections::HashSet;
use std::sync::Arc;

/// Ordered collection of todos, unique by id, in insertion order
#[derive(Clone, Debug)]
pub struct TodoList {
    items: Arc<[Todo]>,
}

impl TodoList {
    /// Creates an empty list
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Arc::from(Vec::<Todo>::new()),
        }
    }

    /// Number of todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if there are no todos
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Todos in display order
    pub fn iter(&self) -> std::slice::Iter<'_, Todo> {
        self.items.iter()
    }

    /// Todos as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[Todo] {
        &self.items
    }

    /// Position of the todo with this id
    #[must_use]
    pub fn position(&self, id: &TodoId) -> Option<usize> {
        self.items.iter().position(|todo| todo.id == *id)
    }

    /// Todo with this id
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.items.iter().find(|todo| todo.id == *id)
    }

    /// Todo at a display position (0-based)
    #[must_use]
    pub fn nth(&self, index: usize) -> Option<&Todo> {
        self.items.get(index)
    }

    /// True if a todo with this id exists
    #[must_use]
    pub fn contains(&self, id: &TodoId) -> bool {
        self.position(id).is_some()
    }

    /// True if both lists share the same backing slice
    ///
    /// `true` implies equality; `false` only means the lists were built
    /// separately.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    /// The most urgent todo (first one wins ties)
    #[must_use]
    pub fn top(&self) -> Option<&Todo> {
        top_todo(&self.items)
    }

    /// A new list with `todo` appended at the end
    ///
    /// The caller supplies a fresh id; the list does not check for clashes
    /// outside debug builds.
    #[must_use]
    pub fn appended(&self, todo: Todo) -> Self {
        debug_assert!(!self.contains(&todo.id), "duplicate todo id {}", todo.id);

        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend_from_slice(&self.items);
        items.push(todo);
        Self {
            items: items.into(),
        }
    }

    /// A new list where the todo sharing `todo.id` has its fields replaced
    ///
    /// Position and id are kept. Returns `None` if no todo has that id.
    #[must_use]
    pub fn replaced(&self, todo: &Todo) -> Option<Self> {
        let index = self.position(&todo.id)?;

        let items: Vec<Todo> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, existing)| {
                if i == index {
                    Todo {
                        id: existing.id,
                        title: todo.title.clone(),
                        description: todo.description.clone(),
                        priority: todo.priority,
                    }
                } else {
                    existing.clone()
                }
            })
            .collect();

        Some(Self {
            items: items.into(),
        })
    }

    /// A new list without the first todo carrying `id`
    ///
    /// At most one element is removed; the rest keep their order. Returns
    /// `None` if no todo has that id.
    #[must_use]
    pub fn removed(&self, id: &TodoId) -> Option<Self> {
        let index = self.position(id)?;

        let items: Vec<Todo> = self
            .items
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, todo)| todo.clone())
            .collect();

        Some(Self {
            items: items.into(),
        })
    }
}

impl Default for TodoList {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for TodoList {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.items == other.items
    }
}

impl Eq for TodoList {}

impl TryFrom<Vec<Todo>> for TodoList {
    type Error = TodoError;

    /// Builds a list, rejecting repeated ids
    fn try_from(items: Vec<Todo>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(items.len());
        for todo in &items {
            if !seen.insert(todo.id) {
                return Err(TodoError::DuplicateId { id: todo.id });
            }
        }
        Ok(Self {
            items: items.into(),
        })
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a Todo;
    type IntoIter = std::slice::Iter<'a, Todo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Priority, TodoDraft};
    use uuid::Uuid;

    fn id(n: u128) -> TodoId {
        TodoId::from_uuid(Uuid::from_u128(n))
    }

    fn todo(n: u128, title: &str, priority: Priority) -> Todo {
        TodoDraft::new(title, "", priority).with_id(id(n))
    }

    fn list(todos: Vec<Todo>) -> TodoList {
        TodoList::try_from(todos).unwrap()
    }

    #[test]
    fn appended_goes_last_and_keeps_the_old_list() {
        let before = list(vec![todo(1, "a", Priority::LOW)]);
        let after = before.appended(todo(2, "b", Priority::HIGH));

        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
        assert_eq!(after.nth(1).map(|t| t.title.as_str()), Some("b"));
        assert!(!after.ptr_eq(&before));
    }

    #[test]
    fn replaced_keeps_position_and_id() {
        let before = list(vec![
            todo(1, "a", Priority::LOW),
            todo(2, "b", Priority::LOW),
            todo(3, "c", Priority::LOW),
        ]);
        let edit = TodoDraft::new("B!", "now", Priority::CRITICAL).with_id(id(2));

        let after = before.replaced(&edit).unwrap();

        assert_eq!(after.position(&id(2)), Some(1));
        assert_eq!(after.get(&id(2)), Some(&edit));
        assert_eq!(after.nth(0), before.nth(0));
        assert_eq!(after.nth(2), before.nth(2));
        assert_eq!(before.get(&id(2)).map(|t| t.title.as_str()), Some("b"));
    }

    #[test]
    fn replaced_misses_return_none() {
        let before = list(vec![todo(1, "a", Priority::LOW)]);
        assert!(before.replaced(&todo(9, "x", Priority::LOW)).is_none());
    }

    #[test]
    fn removed_deletes_one_and_preserves_order() {
        let before = list(vec![
            todo(1, "a", Priority::LOW),
            todo(2, "b", Priority::LOW),
            todo(3, "c", Priority::LOW),
        ]);

        let after = before.removed(&id(2)).unwrap();

        let titles: Vec<_> = after.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c"]);
        assert_eq!(before.len(), 3);
    }

    #[test]
    fn removed_misses_return_none() {
        let before = list(vec![todo(1, "a", Priority::LOW)]);
        assert!(before.removed(&id(2)).is_none());
        assert!(TodoList::new().removed(&id(1)).is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = TodoList::try_from(vec![todo(1, "a", Priority::LOW), todo(1, "b", Priority::LOW)]);
        assert_eq!(result, Err(TodoError::DuplicateId { id: id(1) }));
    }

    #[test]
    fn equality_is_by_value() {
        let a = list(vec![todo(1, "a", Priority::LOW)]);
        let b = list(vec![todo(1, "a", Priority::LOW)]);
        assert!(!a.ptr_eq(&b));
        assert_eq!(a, b);
        assert!(a.ptr_eq(&a.clone()));
    }
}
