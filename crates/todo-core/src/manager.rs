use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Result, TodoError, ValidationError};
use crate::item::{Priority, TodoItem};

/// Owns the task list bound to one JSON file.
///
/// Mutations only touch memory; call [`TodoManager::save`] to persist them.
#[derive(Debug)]
pub struct TodoManager {
    path: PathBuf,
    todos: Vec<TodoItem>,
}

impl TodoManager {
    /// Loads the list from `path`, or starts empty when the file does not
    /// exist. No file is created until [`TodoManager::save`].
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let todos = if path.exists() {
            let text = fs::read_to_string(&path)?;
            parse_document(&text)?
        } else {
            Vec::new()
        };
        debug!(path = %path.display(), count = todos.len(), "loaded todo list");
        Ok(Self { path, todos })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn add(&mut self, text: &str, priority: Priority) -> Result<TodoItem> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText.into());
        }
        let item = TodoItem::new(self.next_id()?, text, false, priority)?;
        self.todos.push(item.clone());
        Ok(item)
    }

    pub fn list(&self) -> &[TodoItem] {
        &self.todos
    }

    pub fn get(&self, id: u64) -> Option<&TodoItem> {
        self.todos.iter().find(|item| item.id() == id)
    }

    /// Marks a task complete. Marking an already-done task succeeds.
    pub fn mark_done(&mut self, id: u64) -> Result<()> {
        let item = self
            .todos
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or(TodoError::NotFound(id))?;
        item.mark_done();
        Ok(())
    }

    pub fn delete(&mut self, id: u64) -> Result<()> {
        let idx = self
            .todos
            .iter()
            .position(|item| item.id() == id)
            .ok_or(TodoError::NotFound(id))?;
        self.todos.remove(idx);
        Ok(())
    }

    /// Drops every completed task and returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let before = self.todos.len();
        self.todos.retain(|item| !item.is_done());
        before - self.todos.len()
    }

    pub fn save(&self) -> Result<()> {
        let todos: Vec<Value> = self
            .todos
            .iter()
            .map(|item| Value::Object(item.to_map()))
            .collect();
        let mut document = Map::new();
        document.insert("todos".to_string(), Value::Array(todos));
        let body = serde_json::to_string_pretty(&Value::Object(document))?;
        fs::write(&self.path, body)?;
        debug!(path = %self.path.display(), count = self.todos.len(), "saved todo list");
        Ok(())
    }

    fn next_id(&self) -> Result<u64> {
        let max = self.todos.iter().map(TodoItem::id).max().unwrap_or(0);
        max.checked_add(1).ok_or(TodoError::IdsExhausted(max))
    }
}

fn parse_document(text: &str) -> Result<Vec<TodoItem>> {
    let document: Value = serde_json::from_str(text)?;
    let Value::Object(document) = document else {
        return Err(ValidationError::InvalidType {
            field: "todos",
            expected: "inside a JSON object",
        }
        .into());
    };
    let entries = document
        .get("todos")
        .ok_or(TodoError::MissingField("todos"))?
        .as_array()
        .ok_or(ValidationError::InvalidType {
            field: "todos",
            expected: "an array",
        })?;

    let mut seen = HashSet::new();
    let mut todos = Vec::with_capacity(entries.len());
    for entry in entries {
        let Value::Object(map) = entry else {
            return Err(ValidationError::InvalidType {
                field: "todos",
                expected: "an array of objects",
            }
            .into());
        };
        let item = TodoItem::from_map(map)?;
        if !seen.insert(item.id()) {
            return Err(ValidationError::DuplicateId(item.id()).into());
        }
        todos.push(item);
    }
    Ok(todos)
}
