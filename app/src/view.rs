//! Text rendering of the app.
//!
//! Every function here is pure: the output depends only on the arguments, so
//! rendering the same snapshot twice gives the same text.

use crate::editable::EditMode;
use crate::form::FormState;
use crate::types::{Priority, Todo, TodoAppState};

const INDENT: &str = "    ";

/// Renders a single todo for display
///
/// ```
/// use todolist::{Priority, TodoDraft, TodoId, view::render_todo};
/// use uuid::Uuid;
///
/// let todo = TodoDraft::new("Walk dog", "Around the block", Priority::HIGH)
///     .with_id(TodoId::from_uuid(Uuid::nil()));
/// assert_eq!(render_todo(&todo), "Walk dog  [priority 2 (Über)]\n    Around the block");
/// ```
#[must_use]
pub fn render_todo(todo: &Todo) -> String {
    let heading = format!("{}  [priority {}]", todo.title, todo.priority);
    if todo.description.is_empty() {
        heading
    } else {
        format!("{heading}\n{INDENT}{}", todo.description)
    }
}

/// Renders a form with its current fields and last error
#[must_use]
pub fn render_form(form: &FormState) -> String {
    let mut lines = vec![
        format!("Title:       {}", form.draft.title),
        format!("Description: {}", form.draft.description),
        format!("Priority:    {}", form.draft.priority),
        format!("Choices:     {}", priority_choices()),
        "[Gø!]".to_string(),
    ];
    if let Some(error) = &form.error {
        lines.push(format!("! {error}"));
    }
    lines.join("\n")
}

fn priority_choices() -> String {
    Priority::LEVELS
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders the list of todos, each in its own view/edit mode
///
/// Items are numbered from 1 in display order; the numbers are what the
/// REPL commands take.
#[must_use]
pub fn render_list(state: &TodoAppState) -> String {
    if state.todos.is_empty() {
        return "You have no todos.".to_string();
    }

    state
        .todos
        .iter()
        .enumerate()
        .map(|(index, todo)| {
            let number = index + 1;
            match state.editing.mode(&todo.id) {
                EditMode::Viewing => {
                    format!("{number}. {}  [Edit] [Del]", indent_tail(&render_todo(todo)))
                },
                EditMode::Editing(form) => {
                    format!("{number}. (editing)\n{}", indent(&render_form(form)))
                },
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the top todo, `None` when there are no todos
#[must_use]
pub fn render_top(state: &TodoAppState) -> Option<String> {
    state.top_todo().map(render_todo)
}

/// Renders the whole app: the list, the top todo, and the add form
///
/// The "Top Todo" section is left out entirely when there are no todos.
#[must_use]
pub fn render_app(state: &TodoAppState) -> String {
    let mut sections = vec![section("Todos", &render_list(state))];
    if let Some(top) = render_top(state) {
        sections.push(section("Top Todo", &top));
    }
    sections.push(section("Add Nü", &render_form(&state.add_form)));
    sections.join("\n\n")
}

fn section(title: &str, body: &str) -> String {
    format!("== {title} ==\n{}", indent(body))
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("{INDENT}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Keeps the first line as is and indents continuation lines
fn indent_tail(text: &str) -> String {
    text.replace('\n', &format!("\n{INDENT}"))
}
