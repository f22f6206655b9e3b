//! Reducer logic for the todo app.
//!
//! Collection commands are validated, turned into events, and the events
//! applied to state. UI intents from the forms and the per-item edit modes
//! come back to this reducer as dispatched actions: a form's `Saved` becomes
//! `Create` or `Update`, and an item's delete control becomes `Remove`.

use crate::error::TodoError;
use crate::form::{FormAction, FormReducer, FormState};
use crate::types::{TodoAction, TodoAppState, TodoId};
use std::sync::Arc;
use todolist_core::action::Action as _;
use todolist_core::composition::{ScopedReducer, scope_reducer};
use todolist_core::environment::IdGenerator;
use todolist_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Source of ids for new todos
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }
}

fn add_form_state(state: &mut TodoAppState) -> &mut FormState {
    &mut state.add_form
}

fn add_form_action(action: TodoAction) -> Option<FormAction> {
    match action {
        TodoAction::AddForm(action) => Some(action),
        _ => None,
    }
}

fn form_env(_: &TodoEnvironment) -> &() {
    &()
}

/// Root reducer of the todo app
#[derive(Debug)]
pub struct TodoAppReducer {
    add_form: ScopedReducer<TodoAppState, TodoAction, TodoEnvironment, FormReducer>,
}

impl TodoAppReducer {
    /// Creates a new `TodoAppReducer`
    #[must_use]
    pub fn new() -> Self {
        Self {
            add_form: scope_reducer(
                FormReducer::new(),
                add_form_state,
                add_form_action,
                TodoAction::AddForm,
                form_env,
            ),
        }
    }

    /// Validates an `Update` command
    fn validate_update(state: &TodoAppState, id: &TodoId) -> Result<(), TodoError> {
        if !state.exists(id) {
            return Err(TodoError::NotFound { id: *id });
        }
        Ok(())
    }

    /// Applies an event to state
    fn apply_event(state: &mut TodoAppState, action: &TodoAction) {
        match action {
            TodoAction::TodoCreated { todo } => {
                state.todos = state.todos.appended(todo.clone());
                state.last_error = None;
                state.bump_version();
            },
            TodoAction::TodoUpdated { todo } => {
                if let Some(todos) = state.todos.replaced(todo) {
                    state.todos = todos;
                }
                state.last_error = None;
                state.bump_version();
            },
            TodoAction::TodoRemoved { id } => {
                if let Some(todos) = state.todos.removed(id) {
                    state.todos = todos;
                }
                state.editing.finish(id);
                state.last_error = None;
                state.bump_version();
            },
            TodoAction::TodoNotFound { id } => {
                state.last_error = Some(TodoError::NotFound { id: *id });
                state.bump_version();
            },
            // Commands and UI intents are not applied to state
            TodoAction::Create { .. }
            | TodoAction::Update { .. }
            | TodoAction::Remove { .. }
            | TodoAction::StartEditing { .. }
            | TodoAction::CancelEditing { .. }
            | TodoAction::RequestDelete { .. }
            | TodoAction::AddForm(_)
            | TodoAction::EditForm { .. } => {},
        }
    }

    /// Runs an item's edit form and lifts its effects back into `EditForm`
    fn reduce_edit_form(
        state: &mut TodoAppState,
        id: TodoId,
        action: FormAction,
    ) -> SmallVec<[Effect<TodoAction>; 4]> {
        let Some(form) = state.editing.form_mut(&id) else {
            tracing::debug!(%id, "Ignoring form input for an item that is not being edited");
            return SmallVec::new();
        };

        let before = form.clone();
        let effects = FormReducer.reduce(form, action, &());
        let changed = *form != before;
        if changed {
            state.bump_version();
        }

        effects
            .into_iter()
            .map(|effect| effect.map(|action| TodoAction::EditForm { id, action }))
            .collect()
    }
}

impl Default for TodoAppReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for TodoAppReducer {
    type State = TodoAppState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            TodoAction::Create { draft } => {
                let todo = draft.with_id(TodoId::from_uuid(env.ids.next_id()));
                tracing::info!(id = %todo.id, priority = todo.priority.value(), "Todo created");

                Self::apply_event(state, &TodoAction::TodoCreated { todo });
                SmallVec::new()
            },

            TodoAction::Update { todo } => {
                if let Err(error) = Self::validate_update(state, &todo.id) {
                    tracing::warn!(%error, "Update rejected");
                    Self::apply_event(state, &TodoAction::TodoNotFound { id: todo.id });
                    return SmallVec::new();
                }

                tracing::info!(id = %todo.id, "Todo updated");
                Self::apply_event(state, &TodoAction::TodoUpdated { todo });
                SmallVec::new()
            },

            TodoAction::Remove { id } => {
                if !state.exists(&id) {
                    tracing::debug!(%id, "Remove of an absent todo, nothing to do");
                    return SmallVec::new();
                }

                tracing::info!(%id, "Todo removed");
                Self::apply_event(state, &TodoAction::TodoRemoved { id });
                SmallVec::new()
            },

            // ========== Events ==========
            // Only the command arms above produce events; one arriving from
            // outside has not been validated against the collection.
            event @ (TodoAction::TodoCreated { .. }
            | TodoAction::TodoUpdated { .. }
            | TodoAction::TodoRemoved { .. }
            | TodoAction::TodoNotFound { .. }) => {
                tracing::debug!(event = event.name(), "Ignoring event sent as input");
                SmallVec::new()
            },

            // ========== Item modes ==========
            TodoAction::StartEditing { id } => {
                let Some(todo) = state.todos.get(&id) else {
                    tracing::debug!(%id, "Cannot edit an absent todo");
                    return SmallVec::new();
                };
                if state.editing.start(todo) {
                    state.bump_version();
                }
                SmallVec::new()
            },

            TodoAction::CancelEditing { id } => {
                if state.editing.cancel(&id) {
                    state.bump_version();
                }
                SmallVec::new()
            },

            TodoAction::RequestDelete { id } => {
                if state.editing.is_editing(&id) {
                    tracing::debug!(%id, "Delete ignored while the item is being edited");
                    return SmallVec::new();
                }
                smallvec![Effect::dispatch(TodoAction::Remove { id })]
            },

            // ========== Forms ==========
            TodoAction::AddForm(FormAction::Saved(draft)) => {
                smallvec![Effect::dispatch(TodoAction::Create { draft })]
            },

            TodoAction::AddForm(action) => {
                let before = state.add_form.clone();
                let effects = self.add_form.reduce(state, TodoAction::AddForm(action), env);
                if state.add_form != before {
                    state.bump_version();
                }
                effects
            },

            TodoAction::EditForm {
                id,
                action: FormAction::Saved(draft),
            } => {
                state.editing.finish(&id);
                state.bump_version();
                smallvec![Effect::dispatch(TodoAction::Update {
                    todo: draft.with_id(id),
                })]
            },

            TodoAction::EditForm { id, action } => Self::reduce_edit_form(state, id, action),
        }
    }
}
