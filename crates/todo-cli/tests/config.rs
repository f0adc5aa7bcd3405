use std::fs;
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_todo"));
    cmd.env_remove("TODO_FILE").env_remove("TODO_LOG");
    cmd
}

#[test]
fn default_data_file_is_todo_json_in_working_dir() {
    let repo = TempDir::new().expect("repo");
    let home = TempDir::new().expect("home");

    let out = bin()
        .current_dir(repo.path())
        .env("TODO_HOME", home.path())
        .args(["add", "a"])
        .output()
        .expect("add");
    assert!(out.status.success());
    assert!(repo.path().join("todo.json").exists());
}

#[test]
fn project_config_sets_file_and_default_priority() {
    let repo = TempDir::new().expect("repo");
    let home = TempDir::new().expect("home");
    fs::write(
        repo.path().join(".todo.toml"),
        "file = \"data/tasks.json\"\ndefault_priority = \"high\"\n",
    )
    .expect("config");
    let child = repo.path().join("src");
    fs::create_dir_all(&child).expect("child dir");

    let out = bin()
        .current_dir(&child)
        .env("TODO_HOME", home.path())
        .args(["add", "from child"])
        .output()
        .expect("add");
    assert!(out.status.success());

    let text = fs::read_to_string(repo.path().join("data").join("tasks.json")).expect("read");
    let todos: Value = serde_json::from_str(&text).expect("json");
    assert_eq!(todos["todos"][0]["priority"], "high");
    assert_eq!(todos["todos"][0]["text"], "from child");
}

#[test]
fn env_file_overrides_config() {
    let repo = TempDir::new().expect("repo");
    let home = TempDir::new().expect("home");
    fs::write(repo.path().join(".todo.toml"), "file = \"ignored.json\"\n").expect("config");
    let explicit = repo.path().join("explicit.json");

    let out = bin()
        .current_dir(repo.path())
        .env("TODO_HOME", home.path())
        .env("TODO_FILE", &explicit)
        .args(["add", "a"])
        .output()
        .expect("add");
    assert!(out.status.success());
    assert!(explicit.exists());
    assert!(!repo.path().join("ignored.json").exists());
}

#[test]
fn global_config_applies_without_project_config() {
    let repo = TempDir::new().expect("repo");
    let home = TempDir::new().expect("home");
    fs::write(home.path().join("config.toml"), "file = \"global.json\"\n").expect("config");

    let out = bin()
        .current_dir(repo.path())
        .env("TODO_HOME", home.path())
        .args(["add", "a"])
        .output()
        .expect("add");
    assert!(out.status.success());
    assert!(home.path().join("global.json").exists());
}
