use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, TodoError, ValidationError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|priority| priority.as_str() == value)
            .ok_or_else(|| ValidationError::InvalidPriority(value.to_string()))
    }
}

/// One task. Fields are read-only outside the crate; completion goes through
/// [`crate::manager::TodoManager::mark_done`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    id: u64,
    text: String,
    done: bool,
    priority: Priority,
}

impl TodoItem {
    /// Builds an item, rejecting a zero id and blank text. The text is stored
    /// as given; trimming is the caller's choice.
    pub fn new(
        id: u64,
        text: impl Into<String>,
        done: bool,
        priority: Priority,
    ) -> std::result::Result<Self, ValidationError> {
        if id == 0 {
            return Err(ValidationError::InvalidId(0));
        }
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
        Ok(Self {
            id,
            text,
            done,
            priority,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub(crate) fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::from(self.id));
        map.insert("text".to_string(), Value::from(self.text.clone()));
        map.insert("done".to_string(), Value::from(self.done));
        map.insert("priority".to_string(), Value::from(self.priority.as_str()));
        map
    }

    /// Decodes a stored record. `id`, `text` and `done` must be present;
    /// `priority` falls back to medium when absent.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self> {
        let id = map.get("id").ok_or(TodoError::MissingField("id"))?;
        let text = map.get("text").ok_or(TodoError::MissingField("text"))?;
        let done = map.get("done").ok_or(TodoError::MissingField("done"))?;

        let id = parse_id(id)?;
        let text = match text {
            Value::String(text) => text.clone(),
            Value::Null => return Err(ValidationError::EmptyText.into()),
            _ => {
                return Err(ValidationError::InvalidType {
                    field: "text",
                    expected: "a string",
                }
                .into())
            }
        };
        let done = done.as_bool().ok_or(ValidationError::InvalidType {
            field: "done",
            expected: "a boolean",
        })?;
        let priority = match map.get("priority") {
            None => Priority::default(),
            Some(Value::String(value)) => value.parse::<Priority>()?,
            Some(other) => return Err(ValidationError::InvalidPriority(other.to_string()).into()),
        };

        Ok(Self::new(id, text, done, priority)?)
    }
}

fn parse_id(value: &Value) -> std::result::Result<u64, ValidationError> {
    if let Some(id) = value.as_u64() {
        return Ok(id);
    }
    match value.as_i64() {
        Some(id) => Err(ValidationError::InvalidId(id)),
        None => Err(ValidationError::InvalidType {
            field: "id",
            expected: "a positive integer",
        }),
    }
}

pub fn render_item_line(item: &TodoItem) -> String {
    let mark = if item.is_done() { "[x]" } else { "[ ]" };
    format!("{} | {} | {} | {}", item.id(), mark, item.priority(), item.text())
}
