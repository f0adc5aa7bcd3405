use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use todo_core::config::{resolve_data_file_with_source, resolve_default_priority};
use todo_core::{render_item_line, Priority, TodoManager};

#[derive(Parser)]
#[command(name = "todo", version, about = "Personal task list manager")]
struct Cli {
    /// Data file (defaults to config, then ./todo.json)
    #[arg(long, global = true, env = "TODO_FILE")]
    file: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Add a task
    Add {
        text: String,
        /// low, medium or high
        #[arg(short, long)]
        priority: Option<Priority>,
    },
    /// List all tasks
    List {
        #[arg(long)]
        json: bool,
    },
    /// Mark a task as done
    Done { id: u64 },
    /// Delete a task
    Delete { id: u64 },
    /// Remove all completed tasks
    Clear,
    /// Print version information
    Version,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };
    let cwd = std::env::current_dir().context("resolve working directory")?;
    let open = || -> Result<TodoManager> {
        let (path, source) = resolve_data_file_with_source(cli.file.as_deref(), &cwd);
        debug!(path = %path.display(), source = source.as_str(), "resolved data file");
        TodoManager::open(&path).with_context(|| format!("load {}", path.display()))
    };

    match command {
        Command::Add { text, priority } => {
            let mut manager = open()?;
            let priority = priority.unwrap_or_else(|| resolve_default_priority(&cwd));
            let item = manager.add(&text, priority)?;
            save(&manager)?;
            println!("Added task {}: {}", item.id(), item.text());
        }
        Command::List { json } => {
            let manager = open()?;
            if json {
                let items: Vec<Value> = manager
                    .list()
                    .iter()
                    .map(|item| Value::Object(item.to_map()))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else if manager.list().is_empty() {
                println!("No tasks (list is empty)");
            } else {
                for item in manager.list() {
                    println!("{}", render_item_line(item));
                }
            }
        }
        Command::Done { id } => {
            let mut manager = open()?;
            manager.mark_done(id)?;
            save(&manager)?;
            println!("Marked task {} as done", id);
        }
        Command::Delete { id } => {
            let mut manager = open()?;
            manager.delete(id)?;
            save(&manager)?;
            println!("Deleted task {}", id);
        }
        Command::Clear => {
            let mut manager = open()?;
            let removed = manager.clear();
            save(&manager)?;
            println!("Cleared {} completed task(s)", removed);
        }
        Command::Version => {
            println!("todo {}", todo_core::version());
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TODO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn save(manager: &TodoManager) -> Result<()> {
    if let Some(parent) = manager.path().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create data dir {}", parent.display()))?;
        }
    }
    manager
        .save()
        .with_context(|| format!("write {}", manager.path().display()))
}
