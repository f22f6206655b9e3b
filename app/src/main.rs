//! Interactive todo list.
//!
//! Reads one command per line from stdin and prints the app again whenever
//! its state changed. Type `help` for the list of commands.

use anyhow::Context;
use std::io::Write;
use std::sync::Arc;
use todolist::cli::{self, Plan};
use todolist::config::{AppConfig, DEFAULT_LOG_FILTER};
use todolist::{TodoAppReducer, TodoAppState, TodoEnvironment, TodoError, view};
use todolist_core::environment::UuidGenerator;
use todolist_runtime::Store;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    let config = AppConfig::from_env();

    init_tracing(&config.log_filter);
    todolist_runtime::metrics::describe();

    let todos = config
        .load_initial_todos(&UuidGenerator)
        .context("Failed to load initial todos")?;
    tracing::info!(todos = todos.len(), "Starting todo app");

    let store = Store::with_config(
        TodoAppState::with_todos(todos),
        TodoAppReducer::new(),
        TodoEnvironment::new(Arc::new(UuidGenerator)),
        config.store,
    );
    let mut changes = store.subscribe_changes();
    let mut last_error: Option<TodoError> = None;

    println!("{}", store.state(view::render_app).await);
    prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let command = match cli::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => {
                prompt()?;
                continue;
            },
            Err(error) => {
                println!("{error}");
                prompt()?;
                continue;
            },
        };

        match store.state(|state| cli::plan(command, state)).await {
            Ok(Plan::Actions(actions)) => {
                for action in actions {
                    if let Err(error) = store.send(action).await {
                        tracing::error!(%error, "Action failed");
                        println!("! {error}");
                        break;
                    }
                }
            },
            Ok(Plan::ShowTop) => {
                let top = store.state(view::render_top).await;
                println!("{}", top.as_deref().unwrap_or("You have no todos."));
            },
            Ok(Plan::ShowAll) => println!("{}", store.state(view::render_app).await),
            Ok(Plan::Quit) => break,
            Err(error) => println!("{error}"),
        }

        if changes.has_changed().unwrap_or(false) {
            changes.mark_unchanged();
            let (rendered, error) = store
                .state(|state| (view::render_app(state), state.last_error.clone()))
                .await;
            println!("{rendered}");
            match &error {
                Some(current) if error != last_error => println!("! {current}"),
                _ => {},
            }
            last_error = error;
        }

        prompt()?;
    }

    store.shutdown();
    tracing::info!("Bye");
    Ok(())
}

fn init_tracing(filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(filter)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn prompt() -> anyhow::Result<()> {
    print!("> ");
    std::io::stdout().flush().context("Failed to write prompt")
}
