//! The add/edit form.
//!
//! One form feature serves two places: the root's "add" form, whose
//! initial draft is blank, and each item's edit form, seeded with the
//! item's fields. The form knows nothing about ids or the collection. On a
//! valid submit it dispatches [`FormAction::Saved`] with the draft and the
//! embedding reducer decides what saving means.

use crate::error::FormError;
use crate::types::{Priority, Todo, TodoDraft};
use todolist_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use todolist_macros::Action;

/// A typed value for one form field
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    /// New title
    Title(String),
    /// New description
    Description(String),
    /// New priority
    Priority(Priority),
}

impl FieldValue {
    /// Parses a raw input by field name
    ///
    /// Names are `title`, `description` and `priority`, case-insensitive.
    ///
    /// # Errors
    ///
    /// [`FormError::UnknownField`] for any other name, and
    /// [`FormError::InvalidPriority`] if a priority does not parse.
    pub fn parse(name: &str, value: &str) -> Result<Self, FormError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title(value.to_string())),
            "description" => Ok(Self::Description(value.to_string())),
            "priority" => Ok(Self::Priority(value.parse()?)),
            _ => Err(FormError::UnknownField(name.to_string())),
        }
    }

    fn apply(self, draft: &mut TodoDraft) {
        match self {
            Self::Title(title) => draft.title = title,
            Self::Description(description) => draft.description = description,
            Self::Priority(priority) => draft.priority = priority,
        }
    }
}

/// State of one form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    /// Fields as currently entered
    pub draft: TodoDraft,
    /// Fields the form starts from and resets to after a submit
    pub initial: TodoDraft,
    /// Last rejected input or submit
    pub error: Option<FormError>,
}

impl FormState {
    /// Creates a form that starts from (and resets to) `initial`
    #[must_use]
    pub fn new(initial: TodoDraft) -> Self {
        Self {
            draft: initial.clone(),
            initial,
            error: None,
        }
    }

    /// Creates an edit form seeded with a todo's current fields
    #[must_use]
    pub fn for_todo(todo: &Todo) -> Self {
        Self::new(todo.draft())
    }

    /// True if the draft differs from the initial fields
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.draft != self.initial
    }
}

/// Actions of the form feature
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum FormAction {
    /// Change one field, leaving the others as they are
    SetField(FieldValue),

    /// Change one field from string input, as a text control would
    SetRaw {
        /// Input name (`title`, `description` or `priority`)
        name: String,
        /// Raw input value
        value: String,
    },

    /// Validate and hand the draft to the parent
    #[command]
    Submit,

    /// The form was submitted with this draft
    #[event]
    Saved(TodoDraft),
}

/// Reducer for a single form
#[derive(Clone, Copy, Debug, Default)]
pub struct FormReducer;

impl FormReducer {
    /// Creates a new `FormReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn validate(draft: &TodoDraft) -> Result<(), FormError> {
        if draft.title.trim().is_empty() {
            return Err(FormError::BlankTitle);
        }
        Ok(())
    }
}

impl Reducer for FormReducer {
    type State = FormState;
    type Action = FormAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            FormAction::SetField(value) => {
                value.apply(&mut state.draft);
                state.error = None;
                SmallVec::new()
            },

            FormAction::SetRaw { name, value } => {
                match FieldValue::parse(&name, &value) {
                    Ok(value) => {
                        value.apply(&mut state.draft);
                        state.error = None;
                    },
                    Err(error) => {
                        tracing::debug!(field = %name, %error, "Rejected form input");
                        state.error = Some(error);
                    },
                }
                SmallVec::new()
            },

            FormAction::Submit => {
                if let Err(error) = Self::validate(&state.draft) {
                    tracing::debug!(%error, "Rejected form submit");
                    state.error = Some(error);
                    return SmallVec::new();
                }

                let draft = std::mem::replace(&mut state.draft, state.initial.clone());
                state.error = None;
                smallvec![Effect::dispatch(FormAction::Saved(draft))]
            },

            // Handled by the embedding reducer
            FormAction::Saved(_) => SmallVec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PriorityError;
    use todolist_testing::{ReducerTest, assertions};

    fn filled() -> FormState {
        FormState {
            draft: TodoDraft::new("Buy milk", "2%", Priority::HIGH),
            ..FormState::default()
        }
    }

    #[test]
    fn set_field_changes_only_that_field() {
        ReducerTest::new(FormReducer::new())
            .with_env(())
            .given_state(filled())
            .when_action(FormAction::SetField(FieldValue::Description("oat".into())))
            .then_state(|state| {
                assert_eq!(state.draft, TodoDraft::new("Buy milk", "oat", Priority::HIGH));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn set_raw_parses_priority() {
        ReducerTest::new(FormReducer::new())
            .with_env(())
            .given_state(filled())
            .when_action(FormAction::SetRaw {
                name: "priority".into(),
                value: "3".into(),
            })
            .then_state(|state| {
                assert_eq!(state.draft.priority, Priority::LOW);
                assert_eq!(state.draft.title, "Buy milk");
                assert!(state.error.is_none());
            })
            .run();
    }

    #[test]
    fn set_raw_rejects_bad_input_without_touching_the_draft() {
        ReducerTest::new(FormReducer::new())
            .with_env(())
            .given_state(filled())
            .when_action(FormAction::SetRaw {
                name: "priority".into(),
                value: "0".into(),
            })
            .then_state(|state| {
                assert_eq!(state.draft, filled().draft);
                assert_eq!(state.error, Some(FormError::InvalidPriority(PriorityError::Zero)));
            })
            .run();

        ReducerTest::new(FormReducer::new())
            .with_env(())
            .given_state(filled())
            .when_action(FormAction::SetRaw {
                name: "colour".into(),
                value: "red".into(),
            })
            .then_state(|state| {
                assert_eq!(state.error, Some(FormError::UnknownField("colour".into())));
            })
            .run();
    }

    #[test]
    fn submit_dispatches_saved_and_resets() {
        ReducerTest::new(FormReducer::new())
            .with_env(())
            .given_state(filled())
            .when_action(FormAction::Submit)
            .then_state(|state| {
                assert_eq!(state.draft, TodoDraft::default());
                assert!(!state.is_dirty());
            })
            .then_effects(|effects| {
                assertions::assert_dispatches(
                    effects,
                    &[FormAction::Saved(TodoDraft::new("Buy milk", "2%", Priority::HIGH))],
                );
            })
            .run();
    }

    #[test]
    fn submit_with_blank_title_is_rejected() {
        let mut state = filled();
        state.draft.title = "   ".into();

        ReducerTest::new(FormReducer::new())
            .with_env(())
            .given_state(state)
            .when_action(FormAction::Submit)
            .then_state(|state| {
                assert_eq!(state.error, Some(FormError::BlankTitle));
                assert_eq!(state.draft.title, "   ");
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn edit_form_resets_to_the_todo() {
        let todo = TodoDraft::new("Walk dog", "", Priority::LOW)
            .with_id(crate::types::TodoId::from_uuid(uuid::Uuid::from_u128(1)));
        let mut state = FormState::for_todo(&todo);
        assert!(!state.is_dirty());

        let _ = FormReducer.reduce(
            &mut state,
            FormAction::SetField(FieldValue::Title("Walk cat".into())),
            &(),
        );
        assert!(state.is_dirty());

        let _ = FormReducer.reduce(&mut state, FormAction::Submit, &());
        assert_eq!(state.draft, todo.draft());
    }

    #[test]
    fn field_names_are_case_insensitive() {
        assert_eq!(
            FieldValue::parse("Title", "x"),
            Ok(FieldValue::Title("x".into()))
        );
    }
}
