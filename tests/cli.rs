use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn expense(base: &Path) -> Command {
    let mut cmd = Command::cargo_bin("expense").unwrap();
    cmd.env("EXPENSE_TRACKER_DATA_DIR", base)
        .env_remove("EXPENSE_DATA_FILE")
        .env("RUST_LOG", "warn");
    cmd
}

fn read_document(path: &Path) -> Vec<Value> {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_init_creates_empty_document() {
    let temp_dir = TempDir::new().unwrap();

    expense(temp_dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created settings file"))
        .stdout(predicate::str::contains("Created expense document"));

    let document = temp_dir.path().join("data").join("expense.json");
    assert_eq!(fs::read_to_string(document).unwrap(), "[]");

    let settings: Value =
        serde_json::from_str(&fs::read_to_string(temp_dir.path().join("config.json")).unwrap())
            .unwrap();
    assert_eq!(settings["host"], "0.0.0.0");
    assert_eq!(settings["port"], 3000);

    expense(temp_dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created settings file").not())
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_init_keeps_existing_settings() {
    let temp_dir = TempDir::new().unwrap();
    let settings_file = temp_dir.path().join("config.json");
    fs::write(&settings_file, r#"{"port": 5000}"#).unwrap();

    expense(temp_dir.path()).arg("init").assert().success();

    assert_eq!(fs::read_to_string(&settings_file).unwrap(), r#"{"port": 5000}"#);
}

#[test]
fn test_add_list_total_edit_delete() {
    let temp_dir = TempDir::new().unwrap();
    let document = temp_dir.path().join("expense.json");
    fs::write(&document, "[]").unwrap();
    let data_file = document.to_str().unwrap();

    expense(temp_dir.path())
        .args(["--data-file", data_file, "add", "coffee", "5", "food"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID: 1"));

    expense(temp_dir.path())
        .args(["--data-file", data_file, "add", "tea", "3", "Food"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID: 2"));

    expense(temp_dir.path())
        .args(["--data-file", data_file, "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("coffee").and(predicate::str::contains("tea")));

    expense(temp_dir.path())
        .args(["--data-file", data_file, "total", "--category", "food"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total for category 'food': 8.00"));

    expense(temp_dir.path())
        .args(["--data-file", data_file, "edit", "1", "--nominal", "7"])
        .assert()
        .success();

    let records = read_document(&document);
    assert_eq!(records[0]["id"], 1);
    assert_eq!(records[0]["nominal"], 7.0);
    assert_eq!(records[0]["name"], "coffee");

    expense(temp_dir.path())
        .args(["--data-file", data_file, "delete", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted expense: tea"));

    assert_eq!(read_document(&document).len(), 1);
}

#[test]
fn test_show_rejects_non_integer_id() {
    let temp_dir = TempDir::new().unwrap();
    let document = temp_dir.path().join("expense.json");
    fs::write(&document, "[]").unwrap();

    expense(temp_dir.path())
        .args(["--data-file", document.to_str().unwrap(), "show", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Id must be integer"));
}

#[test]
fn test_missing_document_fails() {
    let temp_dir = TempDir::new().unwrap();
    let document = temp_dir.path().join("absent.json");

    expense(temp_dir.path())
        .args(["--data-file", document.to_str().unwrap(), "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Storage read error"));
}
