//! Tests for #[derive(Action)] macro

use todolist_core::action::Action;
use todolist_macros::Action;

#[derive(Action, Clone, Debug, PartialEq)]
enum TodoAction {
    #[command]
    Create { title: String },

    #[command]
    Remove(u32),

    #[event]
    TodoCreated { id: u32, title: String },

    #[event]
    TodoRemoved(u32),

    StartEditing { id: u32 },

    Refresh,
}

#[derive(Action, Clone, Debug)]
enum OnlyCommands {
    #[command]
    Ping,
}

#[test]
fn test_is_command() {
    let action = TodoAction::Create {
        title: "Test".to_string(),
    };
    assert!(action.is_command());
    assert!(!action.is_event());
    assert!(TodoAction::Remove(1).is_command());
}

#[test]
fn test_is_event() {
    let action = TodoAction::TodoCreated {
        id: 1,
        title: "Test".to_string(),
    };
    assert!(!action.is_command());
    assert!(action.is_event());
    assert!(TodoAction::TodoRemoved(1).is_event());
}

#[test]
fn test_unmarked_variants_are_neither() {
    for action in [TodoAction::StartEditing { id: 3 }, TodoAction::Refresh] {
        assert!(!action.is_command(), "Should not be command: {action:?}");
        assert!(!action.is_event(), "Should not be event: {action:?}");
    }
}

#[test]
fn test_names_cover_every_variant() {
    let cases = vec![
        (TodoAction::Create { title: String::new() }, "Create"),
        (TodoAction::Remove(1), "Remove"),
        (
            TodoAction::TodoCreated {
                id: 1,
                title: String::new(),
            },
            "TodoCreated",
        ),
        (TodoAction::TodoRemoved(1), "TodoRemoved"),
        (TodoAction::StartEditing { id: 1 }, "StartEditing"),
        (TodoAction::Refresh, "Refresh"),
    ];

    for (action, expected) in cases {
        assert_eq!(action.name(), expected);
    }
}

#[test]
fn test_enum_with_only_commands() {
    assert!(OnlyCommands::Ping.is_command());
    assert!(!OnlyCommands::Ping.is_event());
    assert_eq!(OnlyCommands::Ping.name(), "Ping");
}
