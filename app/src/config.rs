//! Configuration management for the todo app.
//!
//! Loads configuration from environment variables with sensible defaults.
//! The binary calls `dotenvy::dotenv()` first, so a `.env` file in the
//! working directory works too.

use crate::collection::TodoList;
use crate::error::{ConfigError, TodoError};
use crate::types::{Todo, TodoDraft, TodoId};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use todolist_core::environment::IdGenerator;
use todolist_runtime::StoreConfig;

/// Tracing filter used when `TODOLIST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "todolist=info,todolist_runtime=info";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Tracing filter directives (`TODOLIST_LOG`)
    pub log_filter: String,
    /// JSON file with the todos to start from (`TODOLIST_INITIAL_TODOS`)
    pub initial_todos: Option<PathBuf>,
    /// Store tuning (`TODOLIST_MAX_FEEDBACK_ACTIONS`, `TODOLIST_BROADCAST_CAPACITY`)
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from any variable source.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = StoreConfig::default();

        Self {
            log_filter: lookup("TODOLIST_LOG")
                .filter(|filter| !filter.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            initial_todos: lookup("TODOLIST_INITIAL_TODOS")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            store: StoreConfig::default()
                .with_max_feedback_actions(
                    lookup("TODOLIST_MAX_FEEDBACK_ACTIONS")
                        .and_then(|s| s.trim().parse().ok())
                        .unwrap_or(defaults.max_feedback_actions),
                )
                .with_broadcast_capacity(
                    lookup("TODOLIST_BROADCAST_CAPACITY")
                        .and_then(|s| s.trim().parse().ok())
                        .unwrap_or(defaults.broadcast_capacity),
                ),
        }
    }

    /// Reads the initial todos, or returns an empty list if none are configured.
    ///
    /// The file is read once and never written back.
    ///
    /// # Errors
    ///
    /// See [`load_todos`].
    pub fn load_initial_todos(&self, ids: &dyn IdGenerator) -> Result<TodoList, ConfigError> {
        match &self.initial_todos {
            Some(path) => load_todos(path, ids),
            None => Ok(TodoList::new()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// One entry of the initial-todos file; the id may be left out
#[derive(Debug, Deserialize)]
struct SeedTodo {
    #[serde(default)]
    id: Option<TodoId>,
    #[serde(flatten)]
    draft: TodoDraft,
}

/// Reads a JSON array of todos from `path`.
///
/// # Errors
///
/// - [`ConfigError::Io`] if the file cannot be read
/// - [`ConfigError::Parse`] if it is not a JSON array of todos
/// - [`ConfigError::Seed`] if an id is nil or two todos share an id
pub fn load_todos(path: &Path, ids: &dyn IdGenerator) -> Result<TodoList, ConfigError> {
    let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_todos(&json, ids)
}

/// Parses a JSON array of todos, assigning fresh ids to entries without one.
///
/// ```
/// use todolist::config::parse_todos;
/// use todolist_core::environment::UuidGenerator;
///
/// let todos = parse_todos(r#"[{"title": "Water plants", "priority": 2}]"#, &UuidGenerator).unwrap();
/// assert_eq!(todos.len(), 1);
/// assert_eq!(todos.nth(0).unwrap().description, "");
/// ```
///
/// # Errors
///
/// [`ConfigError::Parse`] for malformed input and [`ConfigError::Seed`] for
/// a nil id or repeated ids.
pub fn parse_todos(json: &str, ids: &dyn IdGenerator) -> Result<TodoList, ConfigError> {
    let entries: Vec<SeedTodo> = serde_json::from_str(json)?;
    let todos = entries
        .into_iter()
        .map(|entry| {
            let id = match entry.id {
                Some(id) if id.as_uuid().is_nil() => return Err(TodoError::NilId),
                Some(id) => id,
                None => TodoId::from_uuid(ids.next_id()),
            };
            Ok(entry.draft.with_id(id))
        })
        .collect::<Result<Vec<Todo>, _>>()?;
    Ok(TodoList::try_from(todos)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::TodoError;
    use crate::types::Priority;
    use std::collections::HashMap;
    use std::io::Write;
    use todolist_core::Uuid;
    use todolist_testing::SequentialIdGenerator;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.initial_todos, None);
        assert_eq!(config.store, StoreConfig::default());
    }

    #[test]
    fn reads_variables() {
        let config = AppConfig::from_lookup(lookup(&[
            ("TODOLIST_LOG", "debug"),
            ("TODOLIST_INITIAL_TODOS", "todos.json"),
            ("TODOLIST_MAX_FEEDBACK_ACTIONS", "8"),
            ("TODOLIST_BROADCAST_CAPACITY", "4"),
        ]));

        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.initial_todos, Some(PathBuf::from("todos.json")));
        assert_eq!(config.store, StoreConfig::new(8, 4));
    }

    #[test]
    fn bad_numbers_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup(&[("TODOLIST_MAX_FEEDBACK_ACTIONS", "lots")]));
        assert_eq!(config.store, StoreConfig::default());
    }

    #[test]
    fn parse_assigns_missing_ids_and_keeps_given_ones() {
        let json = r#"[
            {"id": "00000000-0000-0000-0000-0000000000aa", "title": "a", "description": "x", "priority": 3},
            {"title": "b"}
        ]"#;

        let todos = parse_todos(json, &SequentialIdGenerator::new()).unwrap();

        let first = todos.nth(0).unwrap();
        assert_eq!(*first.id.as_uuid(), Uuid::from_u128(0xaa));
        assert_eq!(first.priority, Priority::LOW);

        let second = todos.nth(1).unwrap();
        assert_eq!(*second.id.as_uuid(), Uuid::from_u128(1));
        assert_eq!(second.priority, Priority::CRITICAL);
        assert_eq!(second.description, "");
    }

    #[test]
    fn parse_rejects_duplicate_ids() {
        let json = r#"[
            {"id": "00000000-0000-0000-0000-000000000001", "title": "a"},
            {"id": "00000000-0000-0000-0000-000000000001", "title": "b"}
        ]"#;

        let result = parse_todos(json, &SequentialIdGenerator::new());
        assert!(matches!(
            result,
            Err(ConfigError::Seed(TodoError::DuplicateId { .. }))
        ));
    }

    #[test]
    fn parse_rejects_nil_id() {
        let json = r#"[{"id": "00000000-0000-0000-0000-000000000000", "title": "a"}]"#;

        let result = parse_todos(json, &SequentialIdGenerator::new());
        assert!(matches!(result, Err(ConfigError::Seed(TodoError::NilId))));
    }

    #[test]
    fn parse_rejects_zero_priority() {
        let result = parse_todos(r#"[{"title": "a", "priority": 0}]"#, &SequentialIdGenerator::new());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"title": "from file", "priority": 2}}]"#).unwrap();

        let config = AppConfig {
            initial_todos: Some(file.path().to_path_buf()),
            ..AppConfig::default()
        };
        let todos = config
            .load_initial_todos(&SequentialIdGenerator::new())
            .unwrap();

        assert_eq!(todos.len(), 1);
        assert_eq!(todos.nth(0).unwrap().title, "from file");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let result = load_todos(&path, &SequentialIdGenerator::new());
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn no_seed_means_empty() {
        let todos = AppConfig::default()
            .load_initial_todos(&SequentialIdGenerator::new())
            .unwrap();
        assert!(todos.is_empty());
    }
}
