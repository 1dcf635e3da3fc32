use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use rusqlite::Connection;
use std::path::Path;

fn cmd(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("roomdemo").unwrap();
    cmd.env_remove("ROOMDEMO_LOG_DIR")
        .env_remove("ROOMDEMO_LOG_LEVEL")
        .arg("--db")
        .arg(db);
    cmd
}

#[test]
fn add_then_list_shows_product() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("products.db");

    cmd(&db)
        .args(["add", "Widget", "5"])
        .assert()
        .success()
        .stdout(contains("Product added (id 1)."));

    cmd(&db)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("ID").and(contains("Product")).and(contains("Widget")));
}

#[test]
fn add_with_blank_name_exits_with_validation_code() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("products.db");

    cmd(&db)
        .args(["add", " ", "5"])
        .assert()
        .code(2)
        .stderr(contains("Product name cannot be empty"));

    cmd(&db)
        .args(["--json", "list"])
        .assert()
        .success()
        .stdout(contains("[]"));
}

#[test]
fn add_with_bad_quantity_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("products.db");

    cmd(&db)
        .args(["add", "Widget", "many"])
        .assert()
        .code(2)
        .stderr(contains("Please enter a valid quantity"));
    cmd(&db)
        .args(["add", "Widget", "--", "-3"])
        .assert()
        .code(2)
        .stderr(contains("Quantity must be greater than 0"));
}

#[test]
fn search_json_returns_only_matches() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("products.db");
    cmd(&db).args(["add", "Widget", "5"]).assert().success();
    cmd(&db).args(["add", "Gadget", "2"]).assert().success();

    cmd(&db)
        .args(["--json", "search", "Widget"])
        .assert()
        .success()
        .stdout(contains("\"Widget\"").and(contains("Gadget").not()));

    cmd(&db)
        .args(["--json", "search", "Sprocket"])
        .assert()
        .success()
        .stdout(contains("[]"));
}

#[test]
fn delete_removes_all_records_with_name() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("products.db");
    cmd(&db).args(["add", "Widget", "5"]).assert().success();
    cmd(&db).args(["add", "Widget", "9"]).assert().success();
    cmd(&db).args(["add", "Gadget", "2"]).assert().success();

    cmd(&db)
        .args(["delete", "Widget"])
        .assert()
        .success()
        .stdout(contains("Deleted 2 product(s)."));

    cmd(&db)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Gadget").and(contains("Widget").not()));
}

#[test]
fn shell_runs_form_script() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("products.db");

    cmd(&db)
        .arg("shell")
        .write_stdin("name Widget\nquantity 0\nadd\nquantity 4\nadd\nclear\nquit\n")
        .assert()
        .success()
        .stdout(contains("error: Quantity must be greater than 0").and(contains("Widget")));

    cmd(&db)
        .args(["--json", "list"])
        .assert()
        .success()
        .stdout(contains("\"quantity\": 4"));
}

#[test]
fn db_path_can_come_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("env.db");

    Command::cargo_bin("roomdemo")
        .unwrap()
        .env_remove("ROOMDEMO_LOG_DIR")
        .env("ROOMDEMO_DB_PATH", &db)
        .args(["add", "Widget", "1"])
        .assert()
        .success();

    assert!(db.exists());
}

#[test]
fn relative_log_dir_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("products.db");

    cmd(&db)
        .args(["--log-dir", "relative/logs", "list"])
        .assert()
        .code(1)
        .stderr(contains("absolute"));
}

#[test]
fn log_dir_receives_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("products.db");
    let logs = dir.path().join("logs");

    cmd(&db)
        .arg("--log-dir")
        .arg(&logs)
        .args(["--log-level", "info", "add", "Widget", "2"])
        .assert()
        .success();

    let has_log = std::fs::read_dir(&logs)
        .unwrap()
        .filter_map(Result::ok)
        .any(|entry| entry.file_name().to_string_lossy().starts_with("roomdemo"));
    assert!(has_log);
}

#[test]
fn delete_reports_zero_when_nothing_matches() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("products.db");
    cmd(&db).args(["add", "Widget", "5"]).assert().success();

    cmd(&db)
        .args(["delete", "Sprocket"])
        .assert()
        .success()
        .stdout(contains("Deleted 0 product(s)."));

    cmd(&db)
        .args(["--json", "delete", "Widget"])
        .assert()
        .success()
        .stdout(contains("\"affected\": 1"));
}

#[test]
fn store_write_failure_exits_with_failure_code() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("products.db");
    cmd(&db).arg("list").assert().success();

    let writer = Connection::open(&db).unwrap();
    writer.execute_batch("BEGIN IMMEDIATE;").unwrap();

    cmd(&db)
        .args(["add", "Widget", "5"])
        .assert()
        .code(1)
        .stdout(contains("Product added").not())
        .stderr(contains("store job `insert` failed"));

    cmd(&db)
        .args(["delete", "Widget"])
        .assert()
        .code(1)
        .stderr(contains("store job `delete` failed"));

    writer.execute_batch("ROLLBACK;").unwrap();
    cmd(&db)
        .args(["--json", "list"])
        .assert()
        .success()
        .stdout(contains("[]"));
}
