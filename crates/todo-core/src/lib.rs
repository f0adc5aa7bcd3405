//! Core domain types for the todo task list: items, the file-backed manager,
//! and config resolution.

pub mod config;
pub mod error;
pub mod item;
pub mod manager;

#[cfg(test)]
mod test_env;

pub use error::{Result, TodoError, ValidationError};
pub use item::{render_item_line, Priority, TodoItem};
pub use manager::TodoManager;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
