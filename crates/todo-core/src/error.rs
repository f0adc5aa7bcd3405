use thiserror::Error;

pub type Result<T> = std::result::Result<T, TodoError>;

/// A field value that breaks an item invariant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("text must not be empty")]
    EmptyText,
    #[error("id must be a positive integer (got {0})")]
    InvalidId(i64),
    #[error("priority must be one of low, medium, high (got {0:?})")]
    InvalidPriority(String),
    #[error("duplicate id {0}")]
    DuplicateId(u64),
    #[error("field `{field}` must be {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum TodoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("task not found: {0}")]
    NotFound(u64),
    #[error("no ids left after {0}")]
    IdsExhausted(u64),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
