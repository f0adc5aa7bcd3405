use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::item::Priority;

pub const DEFAULT_DATA_FILE: &str = "todo.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoConfig {
    /// Data file path. Relative paths resolve against the directory holding
    /// the config (the project root, or the todo home for the global config).
    pub file: Option<String>,
    /// Priority used by `add` when none is given.
    pub default_priority: Option<Priority>,
}

/// Where a resolved setting came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Flag,
    Project,
    Global,
    Default,
}

impl ConfigSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigSource::Flag => "flag",
            ConfigSource::Project => "project",
            ConfigSource::Global => "global",
            ConfigSource::Default => "default",
        }
    }
}

pub fn config_filename_candidates() -> [&'static str; 2] {
    [".todo.toml", ".todorc"]
}

pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(".todo.toml")
}

pub fn resolve_user_home_dir() -> Option<PathBuf> {
    for var in ["HOME", "USERPROFILE"] {
        if let Ok(value) = std::env::var(var) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
    }
    None
}

/// `$TODO_HOME`, else `~/.todo`.
pub fn resolve_todo_home_dir() -> Option<PathBuf> {
    if let Ok(value) = std::env::var("TODO_HOME") {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    resolve_user_home_dir().map(|home| home.join(".todo"))
}

pub fn global_config_path() -> Option<PathBuf> {
    resolve_todo_home_dir().map(|home| home.join("config.toml"))
}

pub fn find_config_root(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    for candidate in start.ancestors() {
        for name in config_filename_candidates() {
            if candidate.join(name).is_file() {
                return Some(candidate.to_path_buf());
            }
        }
    }
    None
}

pub fn load_config(project_root: &Path) -> Option<TodoConfig> {
    for name in config_filename_candidates() {
        let path = project_root.join(name);
        if path.is_file() {
            if let Ok(text) = fs::read_to_string(&path) {
                if let Ok(config) = toml::from_str::<TodoConfig>(&text) {
                    return Some(config);
                }
            }
        }
    }
    None
}

pub fn load_global_config() -> Option<TodoConfig> {
    let path = global_config_path()?;
    if !path.is_file() {
        return None;
    }
    let text = fs::read_to_string(path).ok()?;
    toml::from_str::<TodoConfig>(&text).ok()
}

pub fn write_config(project_root: &Path, config: &TodoConfig) -> Result<PathBuf, ConfigError> {
    let path = config_path(project_root);
    let body = toml::to_string_pretty(config)?;
    fs::write(&path, body)?;
    Ok(path)
}

fn configured_file(base: &Path, config: Option<TodoConfig>) -> Option<PathBuf> {
    let file = config?.file?;
    let trimmed = file.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(base.join(trimmed))
}

/// Picks the data file: explicit flag, then project config, then global
/// config, then `todo.json` in `cwd`.
pub fn resolve_data_file_with_source(
    explicit: Option<&Path>,
    cwd: &Path,
) -> (PathBuf, ConfigSource) {
    if let Some(path) = explicit {
        return (path.to_path_buf(), ConfigSource::Flag);
    }
    if let Some(root) = find_config_root(cwd) {
        if let Some(path) = configured_file(&root, load_config(&root)) {
            return (path, ConfigSource::Project);
        }
    }
    if let Some(home) = resolve_todo_home_dir() {
        if let Some(path) = configured_file(&home, load_global_config()) {
            return (path, ConfigSource::Global);
        }
    }
    (cwd.join(DEFAULT_DATA_FILE), ConfigSource::Default)
}

pub fn resolve_default_priority_with_source(cwd: &Path) -> (Priority, ConfigSource) {
    let project = find_config_root(cwd).and_then(|root| load_config(&root));
    if let Some(value) = project.and_then(|config| config.default_priority) {
        return (value, ConfigSource::Project);
    }
    if let Some(value) = load_global_config().and_then(|config| config.default_priority) {
        return (value, ConfigSource::Global);
    }
    (Priority::default(), ConfigSource::Default)
}

pub fn resolve_default_priority(cwd: &Path) -> Priority {
    resolve_default_priority_with_source(cwd).0
}
