//! Top-priority derivation.

use crate::types::Todo;

/// Returns the most urgent todo, or `None` for an empty slice
///
/// Scans left to right and only replaces the current candidate with a
/// strictly more urgent one, so among equal priorities the first occurrence
/// wins.
#[must_use]
pub fn top_todo(todos: &[Todo]) -> Option<&Todo> {
    let (first, rest) = todos.split_first()?;
    Some(rest.iter().fold(first, |top, todo| {
        if todo.priority.is_more_urgent_than(top.priority) {
            todo
        } else {
            top
        }
    }))
}
