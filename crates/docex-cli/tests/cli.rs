use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Temp dir with a blank config and the given input files.
fn workspace(files: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.json"), "{}").unwrap();
    fs::create_dir(dir.path().join("in")).unwrap();
    for name in files {
        fs::write(dir.path().join("in").join(name), b"%PDF-1.4 test").unwrap();
    }
    dir
}

fn docex(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("docex").unwrap();
    cmd.arg("-c").arg(dir.join("config.json"));
    cmd
}

fn pattern(dir: &Path) -> String {
    dir.join("in").join("*").to_string_lossy().into_owned()
}

#[test]
fn schema_list_shows_demo_schemas() {
    let dir = workspace(&[]);
    docex(dir.path())
        .args(["schema", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema 1 (Invoice Number)"))
        .stdout(predicate::str::contains("Total Items (number)"));
}

#[test]
fn schema_new_appends_to_file() {
    let dir = workspace(&[]);
    let schemas = dir.path().join("schemas.json");

    for _ in 0..2 {
        docex(dir.path())
            .args(["schema", "new", "-f", "Title:text", "-f", "Due:date", "-o"])
            .arg(&schemas)
            .assert()
            .success();
    }

    docex(dir.path())
        .args(["schema", "list", "--schemas"])
        .arg(&schemas)
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema 2 (Title)"))
        .stdout(predicate::str::contains("Due (date)"));
}

#[test]
fn schema_new_rejects_empty_name() {
    let dir = workspace(&[]);
    docex(dir.path())
        .args(["schema", "new", "-f", "Title", "-f", ":number"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("all fields must have a name"));
}

#[test]
fn extract_requires_schema() {
    let dir = workspace(&["a.pdf"]);
    docex(dir.path())
        .arg("extract")
        .arg(pattern(dir.path()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("please select a schema"));
}

#[test]
fn extract_requires_files() {
    let dir = workspace(&[]);
    docex(dir.path())
        .arg("extract")
        .arg(pattern(dir.path()))
        .args(["--schema", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("please select files to process"));
}

#[test]
fn extract_writes_csv_exports() {
    let dir = workspace(&["a.pdf", "b.pdf"]);
    let out = dir.path().join("out");

    docex(dir.path())
        .arg("extract")
        .arg(pattern(dir.path()))
        .args(["--schema", "3", "--fail", "b.pdf", "--record", "a.pdf", "-f", "csv", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "File Name,Status,Receipt Number,Transaction Date,Payment Method,Amount Paid",
        ))
        .stdout(predicate::str::contains("b.pdf,failed,,,,"));

    let bulk = fs::read_to_string(out.join("extraction_results.csv")).unwrap();
    let lines: Vec<_> = bulk.split('\n').collect();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|l| l.split(',').count() == 6));

    let record = fs::read_to_string(out.join("a.pdf_extraction.csv")).unwrap();
    assert!(record.starts_with("Field,Value\nStatus,success\nReceipt Number,Sample Receipt Number"));
}

#[test]
fn extract_rejects_oversized_files() {
    let dir = workspace(&[]);
    fs::write(dir.path().join("config.json"), r#"{"extraction":{"max_file_size_mb":1}}"#).unwrap();
    fs::write(dir.path().join("in").join("big.pdf"), vec![0u8; 2 * 1024 * 1024]).unwrap();

    docex(dir.path())
        .arg("extract")
        .arg(pattern(dir.path()))
        .args(["--schema", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("big.pdf"));
}

#[test]
fn config_set_and_get() {
    let dir = workspace(&[]);

    docex(dir.path())
        .args(["config", "set", "extraction.timeout_secs", "45"])
        .assert()
        .success();

    docex(dir.path())
        .args(["config", "get", "extraction.timeout_secs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("45"));

    docex(dir.path())
        .args(["config", "set", "api.mistral_api_key", "sk-test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sk-test").not());

    docex(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sk-test").not());
}

#[test]
fn config_set_rejects_unknown_key() {
    let dir = workspace(&[]);

    docex(dir.path())
        .args(["config", "set", "extraction.timeout", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));

    let saved = fs::read_to_string(dir.path().join("config.json")).unwrap();
    assert_eq!(saved, "{}");
}

#[test]
fn config_set_keeps_numeric_api_key_as_text() {
    let dir = workspace(&[]);

    docex(dir.path())
        .args(["config", "set", "api.mistral_api_key", "12345"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12345").not());

    let saved = fs::read_to_string(dir.path().join("config.json")).unwrap();
    assert!(saved.contains(r#""mistral_api_key": "12345""#));
}
