//! The line-based command interface.
//!
//! Each input line is split into words (honoring quotes) and parsed with
//! clap in multicall mode, so the first word is the command name. A parsed
//! [`Command`] is then planned against the current state: item numbers are
//! resolved to ids and the command becomes the actions to send.

use crate::form::{FieldValue, FormAction};
use crate::types::{Priority, TodoAction, TodoAppState, TodoId};
use clap::{Parser, Subcommand};
use thiserror::Error;

/// One input line
#[derive(Parser, Debug)]
#[command(multicall = true)]
pub struct Line {
    /// The command on this line
    #[command(subcommand)]
    pub command: Command,
}

/// Commands understood by the prompt
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fill the add form and submit it
    Add {
        /// Title words
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Priority (1 = Ultra-Über, 2 = Über, 3 = Meh)
        #[arg(short, long, default_value = "1")]
        priority: Priority,
    },
    /// Set one field of the add form, or of an item's edit form
    Set {
        /// Item number whose edit form to change
        #[arg(long)]
        item: Option<usize>,
        /// Field name: title, description or priority
        field: String,
        /// New value
        #[arg(num_args = 0.., allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Submit the add form, or an item's edit form
    Save {
        /// Item number whose edit form to submit
        #[arg(long)]
        item: Option<usize>,
    },
    /// Start editing an item
    Edit {
        /// Item number
        n: usize,
    },
    /// Stop editing an item without saving
    Cancel {
        /// Item number
        n: usize,
    },
    /// Delete an item
    Del {
        /// Item number
        n: usize,
    },
    /// Show the most urgent todo
    Top,
    /// Show everything
    Show,
    /// Leave
    #[command(alias = "exit")]
    Quit,
}

/// What the prompt should do for a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Send these actions to the store, in order
    Actions(Vec<TodoAction>),
    /// Print the top todo
    ShowTop,
    /// Print the whole app
    ShowAll,
    /// Stop reading input
    Quit,
}

/// Input that could not be turned into a plan
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// A quoted word was not closed
    #[error("Unterminated quote")]
    UnterminatedQuote,

    /// clap rejected the line (also used for `help` output)
    #[error("{0}")]
    Usage(String),

    /// Item numbers start at 1 and end at the number of todos
    #[error("No item {n} (there are {count} todos)")]
    NoSuchItem {
        /// The number given
        n: usize,
        /// Number of todos at the time
        count: usize,
    },
}

/// Splits a line into words
///
/// Words are separated by whitespace. Single or double quotes group words,
/// and a backslash outside single quotes escapes the next character.
///
/// # Errors
///
/// [`CliError::UnterminatedQuote`] if a quote is left open.
pub fn split_words(line: &str) -> Result<Vec<String>, CliError> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (None | Some('"'), '\\') => {
                if let Some(escaped) = chars.next() {
                    word.push(escaped);
                }
                in_word = true;
            },
            (Some(_), c) => word.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            },
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            },
            (None, c) => {
                word.push(c);
                in_word = true;
            },
        }
    }

    if quote.is_some() {
        return Err(CliError::UnterminatedQuote);
    }
    if in_word {
        words.push(word);
    }
    Ok(words)
}

/// Parses one input line, `None` for a blank line
///
/// # Errors
///
/// [`CliError::UnterminatedQuote`] or [`CliError::Usage`].
pub fn parse_line(line: &str) -> Result<Option<Command>, CliError> {
    let words = split_words(line)?;
    if words.is_empty() {
        return Ok(None);
    }

    Line::try_parse_from(words)
        .map(|line| Some(line.command))
        .map_err(|error| CliError::Usage(error.render().to_string().trim_end().to_string()))
}

/// Id of the item shown at 1-based position `n`
fn resolve(state: &TodoAppState, n: usize) -> Result<TodoId, CliError> {
    n.checked_sub(1)
        .and_then(|index| state.todos.nth(index))
        .map(|todo| todo.id)
        .ok_or(CliError::NoSuchItem {
            n,
            count: state.count(),
        })
}

/// Routes a form action to the add form or to item `n`'s edit form
fn form_action(state: &TodoAppState, item: Option<usize>, action: FormAction) -> Result<TodoAction, CliError> {
    match item {
        Some(n) => Ok(TodoAction::EditForm {
            id: resolve(state, n)?,
            action,
        }),
        None => Ok(TodoAction::AddForm(action)),
    }
}

/// Turns a command into a plan for the current state
///
/// # Errors
///
/// [`CliError::NoSuchItem`] if an item number is out of range.
pub fn plan(command: Command, state: &TodoAppState) -> Result<Plan, CliError> {
    let actions = match command {
        Command::Add {
            title,
            description,
            priority,
        } => [
            FormAction::SetField(FieldValue::Title(title.join(" "))),
            FormAction::SetField(FieldValue::Description(description)),
            FormAction::SetField(FieldValue::Priority(priority)),
            FormAction::Submit,
        ]
        .into_iter()
        .map(TodoAction::AddForm)
        .collect(),
        Command::Set { item, field, value } => {
            let raw = FormAction::SetRaw {
                name: field,
                value: value.join(" "),
            };
            vec![form_action(state, item, raw)?]
        },
        Command::Save { item } => vec![form_action(state, item, FormAction::Submit)?],
        Command::Edit { n } => vec![TodoAction::StartEditing {
            id: resolve(state, n)?,
        }],
        Command::Cancel { n } => vec![TodoAction::CancelEditing {
            id: resolve(state, n)?,
        }],
        Command::Del { n } => vec![TodoAction::RequestDelete {
            id: resolve(state, n)?,
        }],
        Command::Top => return Ok(Plan::ShowTop),
        Command::Show => return Ok(Plan::ShowAll),
        Command::Quit => return Ok(Plan::Quit),
    };
    Ok(Plan::Actions(actions))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::collection::TodoList;
    use crate::types::TodoDraft;
    use uuid::Uuid;

    fn id(n: u128) -> TodoId {
        TodoId::from_uuid(Uuid::from_u128(n))
    }

    fn two() -> TodoAppState {
        TodoAppState::with_todos(
            TodoList::try_from(vec![
                TodoDraft::new("a", "", Priority::LOW).with_id(id(10)),
                TodoDraft::new("b", "", Priority::LOW).with_id(id(20)),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn split_words_honors_quotes() {
        assert_eq!(
            split_words(r#"add "Buy milk" -d 'oat, 2%'  -p 2"#).unwrap(),
            vec!["add", "Buy milk", "-d", "oat, 2%", "-p", "2"]
        );
        assert_eq!(split_words(r#"set title "" "#).unwrap(), vec!["set", "title", ""]);
        assert_eq!(split_words(r"a\ b").unwrap(), vec!["a b"]);
        assert_eq!(split_words("   ").unwrap(), Vec::<String>::new());
        assert_eq!(split_words("add \"oops"), Err(CliError::UnterminatedQuote));
    }

    #[test]
    fn parses_add() {
        let command = parse_line("add Buy milk -d 2% -p 3").unwrap();
        assert_eq!(
            command,
            Some(Command::Add {
                title: vec!["Buy".into(), "milk".into()],
                description: "2%".into(),
                priority: Priority::LOW,
            })
        );
    }

    #[test]
    fn add_defaults_to_most_urgent() {
        let priority = match parse_line("add nap").unwrap() {
            Some(Command::Add { priority, .. }) => Some(priority),
            _ => None,
        };
        assert_eq!(priority, Some(Priority::CRITICAL));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(parse_line("add nap -p 0"), Err(CliError::Usage(_))));
        assert!(matches!(parse_line("frobnicate"), Err(CliError::Usage(_))));
        assert!(matches!(parse_line("edit"), Err(CliError::Usage(_))));
        assert_eq!(parse_line(""), Ok(None));
    }

    #[test]
    fn exit_is_quit() {
        assert_eq!(parse_line("exit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn add_plans_form_input_then_submit() {
        let command = parse_line("add Walk dog -p 2").unwrap().unwrap();
        assert_eq!(
            plan(command, &TodoAppState::new()),
            Ok(Plan::Actions(vec![
                TodoAction::AddForm(FormAction::SetField(FieldValue::Title("Walk dog".into()))),
                TodoAction::AddForm(FormAction::SetField(FieldValue::Description(String::new()))),
                TodoAction::AddForm(FormAction::SetField(FieldValue::Priority(Priority::HIGH))),
                TodoAction::AddForm(FormAction::Submit),
            ]))
        );
    }

    #[test]
    fn item_numbers_resolve_to_ids() {
        let state = two();

        let command = parse_line("del 2").unwrap().unwrap();
        assert_eq!(
            plan(command, &state),
            Ok(Plan::Actions(vec![TodoAction::RequestDelete { id: id(20) }]))
        );

        let command = parse_line("set --item 1 title New title").unwrap().unwrap();
        assert_eq!(
            plan(command, &state),
            Ok(Plan::Actions(vec![TodoAction::EditForm {
                id: id(10),
                action: FormAction::SetRaw {
                    name: "title".into(),
                    value: "New title".into(),
                },
            }]))
        );
    }

    #[test]
    fn out_of_range_items_are_rejected() {
        let state = two();
        for line in ["edit 0", "edit 3", "save --item 9"] {
            let command = parse_line(line).unwrap().unwrap();
            assert!(matches!(plan(command, &state), Err(CliError::NoSuchItem { .. })));
        }
    }

    #[test]
    fn show_commands() {
        let state = TodoAppState::new();
        assert_eq!(plan(Command::Top, &state), Ok(Plan::ShowTop));
        assert_eq!(plan(Command::Show, &state), Ok(Plan::ShowAll));
        assert_eq!(plan(Command::Quit, &state), Ok(Plan::Quit));
    }
}
