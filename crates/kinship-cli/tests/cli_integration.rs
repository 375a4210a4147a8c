//! Integration tests for kinship-cli functionality.
//! Runs the built binary against record files written to a temp directory.

use std::path::Path;
use std::process::{Command, Output};

const PEOPLE: &str = "1 2 3\n4\n5\n";
const RELATIONS: &str = "1,2,friend\n2,3,relative\n4,5,coworker\n";

fn write_fixture(dir: &Path) {
    std::fs::write(dir.join("people.txt"), PEOPLE).unwrap();
    std::fs::write(dir.join("relations.csv"), RELATIONS).unwrap();
}

fn kinship(dir: &Path, args: &[&str]) -> Output {
    kinship_with_env(dir, args, &[])
}

fn kinship_with_env(dir: &Path, args: &[&str], vars: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kinship"))
        .arg("--project")
        .arg(dir)
        .args(args)
        .env_remove("KINSHIP_PEOPLE")
        .env_remove("KINSHIP_RELATIONS")
        .env_remove("KINSHIP_DELIMITER")
        .env_remove("KINSHIP_SKIP_MALFORMED")
        .env_remove("KINSHIP_FORMAT")
        .env("RUST_LOG", "warn")
        .envs(vars.iter().copied())
        .output()
        .expect("failed to run kinship binary")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "kinship failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_related() {
    let tmp = tempfile::tempdir().unwrap();
    write_fixture(tmp.path());

    assert_eq!(stdout(&kinship(tmp.path(), &["related", "1", "3"])).trim(), "true");
    assert_eq!(
        stdout(&kinship(tmp.path(), &["related", "1", "3", "--label", "friend"])).trim(),
        "false"
    );
    assert_eq!(stdout(&kinship(tmp.path(), &["related", "1", "4"])).trim(), "false");
}

#[test]
fn test_distance() {
    let tmp = tempfile::tempdir().unwrap();
    write_fixture(tmp.path());

    assert_eq!(stdout(&kinship(tmp.path(), &["distance", "1", "3"])).trim(), "2");
    assert_eq!(stdout(&kinship(tmp.path(), &["distance", "1", "5"])).trim(), "-1");
    assert_eq!(
        stdout(&kinship(tmp.path(), &["distance", "2", "3", "-l", "relative"])).trim(),
        "1"
    );
}

#[test]
fn test_steps() {
    let tmp = tempfile::tempdir().unwrap();
    write_fixture(tmp.path());

    let out = stdout(&kinship(tmp.path(), &["steps", "2", "1"]));
    assert_eq!(out.lines().collect::<Vec<_>>(), vec!["1", "3"]);
    assert!(stdout(&kinship(tmp.path(), &["steps", "2", "0"])).is_empty());
}

#[test]
fn test_groups() {
    let tmp = tempfile::tempdir().unwrap();
    write_fixture(tmp.path());

    assert_eq!(stdout(&kinship(tmp.path(), &["groups"])).trim(), "2");
    assert_eq!(
        stdout(&kinship(tmp.path(), &["groups", "-l", "friend"])).trim(),
        "4"
    );
    assert_eq!(
        stdout(&kinship(
            tmp.path(),
            &["groups", "-l", "friend", "-l", "relative"]
        ))
        .trim(),
        "3"
    );
}

#[test]
fn test_json_output() {
    let tmp = tempfile::tempdir().unwrap();
    write_fixture(tmp.path());

    let out = stdout(&kinship(tmp.path(), &["--json", "groups", "-l", "friend"]));
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["groups"], 4);
    assert_eq!(value["flooded"], 1);
    assert_eq!(value["singletons"], 3);

    let out = stdout(&kinship(tmp.path(), &["--json", "steps", "1", "2"]));
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["people"], serde_json::json!([3]));
}

#[test]
fn test_info() {
    let tmp = tempfile::tempdir().unwrap();
    write_fixture(tmp.path());

    let out = stdout(&kinship(tmp.path(), &["--json", "info"]));
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["people"], 5);
    assert_eq!(value["relations"], 3);
    assert_eq!(value["isolated"], 0);
    assert_eq!(value["groups"], 2);
    assert_eq!(value["labels"]["friend"], 1);
}

#[test]
fn test_config_file_selects_records() {
    let tmp = tempfile::tempdir().unwrap();
    let data = tmp.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("roster.txt"), "10 20 30\n").unwrap();
    std::fs::write(data.join("edges.psv"), "10|20|friend\n").unwrap();

    let config_dir = tmp.path().join(".kinship");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        r#"
[ingest]
people = "data/roster.txt"
relations = "data/edges.psv"
delimiter = "|"
"#,
    )
    .unwrap();

    assert_eq!(stdout(&kinship(tmp.path(), &["groups"])).trim(), "2");
}

#[test]
fn test_missing_file_fails() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("people.txt"), PEOPLE).unwrap();

    let output = kinship(tmp.path(), &["groups"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("relations.csv"), "stderr: {stderr}");
}

#[test]
fn test_malformed_record_reports_line() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("people.txt"), PEOPLE).unwrap();
    std::fs::write(tmp.path().join("relations.csv"), "1,2,friend\n1;2;oops\n").unwrap();

    let output = kinship(tmp.path(), &["groups"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(":2:"), "stderr: {stderr}");
}

#[test]
fn test_env_overrides_config_file() {
    let tmp = tempfile::tempdir().unwrap();
    write_fixture(tmp.path());
    // Config points at a relationship file with a single edge.
    std::fs::write(tmp.path().join("sparse.csv"), "1,2,friend\n").unwrap();
    let config_dir = tmp.path().join(".kinship");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[ingest]\nrelations = \"sparse.csv\"\n\n[output]\nformat = \"text\"\n",
    )
    .unwrap();

    assert_eq!(stdout(&kinship(tmp.path(), &["groups"])).trim(), "4");

    let out = stdout(&kinship_with_env(
        tmp.path(),
        &["groups"],
        &[("KINSHIP_RELATIONS", "relations.csv"), ("KINSHIP_FORMAT", "json")],
    ));
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["groups"], 2);
}

#[test]
fn test_env_delimiter_and_skip_malformed() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("people.txt"), PEOPLE).unwrap();
    std::fs::write(
        tmp.path().join("relations.csv"),
        "1;2;friend\nbroken\n2;3;relative\n",
    )
    .unwrap();

    assert!(!kinship(tmp.path(), &["groups"]).status.success());

    let out = stdout(&kinship_with_env(
        tmp.path(),
        &["groups"],
        &[("KINSHIP_DELIMITER", ";"), ("KINSHIP_SKIP_MALFORMED", "true")],
    ));
    assert_eq!(out.trim(), "3");
}

#[test]
fn test_unparseable_env_override_warns() {
    let tmp = tempfile::tempdir().unwrap();
    write_fixture(tmp.path());

    let output = kinship_with_env(tmp.path(), &["groups"], &[("KINSHIP_FORMAT", "yaml")]);
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    assert_eq!(stdout(&output).trim(), "2");
    assert!(stderr.contains("KINSHIP_FORMAT"), "stderr: {stderr}");
    assert!(stderr.contains("yaml"), "stderr: {stderr}");
}

#[test]
fn test_path_flags_resolve_against_project() {
    let tmp = tempfile::tempdir().unwrap();
    let data = tmp.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("roster.txt"), "7 8 9\n").unwrap();
    std::fs::write(data.join("links.csv"), "7,8,coworker\n8,9,coworker\n").unwrap();

    let out = stdout(&kinship(
        tmp.path(),
        &[
            "--people",
            "data/roster.txt",
            "--relations",
            "data/links.csv",
            "distance",
            "7",
            "9",
        ],
    ));
    assert_eq!(out.trim(), "2");
}
