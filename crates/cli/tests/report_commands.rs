use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

#[allow(deprecated)]
fn scorecard() -> Command {
    let mut cmd = Command::cargo_bin("scorecard").expect("binary");
    cmd.env_remove("SCORECARD_SEED");
    cmd
}

fn write_seed(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("seed.json");
    fs::write(&path, body).unwrap();
    path
}

fn run_json(args: &[&str]) -> Value {
    let output = scorecard().args(args).output().expect("command run");
    assert!(output.status.success(), "{output:?}");
    serde_json::from_slice(&output.stdout).expect("valid json")
}

const LEARNING_SEED: &str = r#"
{
  "schema_version": 1,
  "perspectives": ["Financial", "Customer", "Internal", "Learning"],
  "dependencies": [{ "from": "Learning", "to": "Internal" }],
  "kpis": [
    { "perspective": "Learning", "name": "Training hours", "target": 100, "achieved": 10 }
  ]
}
"#;

#[test]
fn builtin_seed_lists_four_perspectives() {
    scorecard()
        .arg("perspectives")
        .assert()
        .success()
        .stdout(predicate::str::contains("count = 4"))
        .stdout(predicate::str::contains("1. Financial"))
        .stdout(predicate::str::contains("4. Learning"));
}

#[test]
fn empty_flag_starts_without_perspectives() {
    let body = run_json(&["--empty", "perspectives", "--json"]);
    assert_eq!(body, Value::Array(vec![]));

    scorecard()
        .args(["--empty", "evaluate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No data to evaluate."));
}

#[test]
fn empty_flag_overrides_seed_from_env() {
    let temp = tempdir().unwrap();
    let seed = write_seed(temp.path(), LEARNING_SEED);

    let output = scorecard()
        .env("SCORECARD_SEED", &seed)
        .args(["--empty", "perspectives", "--json"])
        .output()
        .expect("command run");
    assert!(output.status.success(), "{output:?}");
    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body, Value::Array(vec![]));

    let body = run_json(&["--empty", "--seed", seed.to_str().unwrap(), "perspectives", "--json"]);
    assert_eq!(body, Value::Array(vec![]));
}

#[test]
fn evaluate_reports_dependency_impact() {
    let temp = tempdir().unwrap();
    let seed = write_seed(temp.path(), LEARNING_SEED);
    let seed = seed.to_str().unwrap();

    let body = run_json(&["--seed", seed, "evaluate", "--json"]);
    assert_eq!(body["perspectives"][0]["average"], Value::Null);
    assert_eq!(body["perspectives"][3]["name"], "Learning");
    assert_eq!(body["perspectives"][3]["band"], "critical");
    assert_eq!(body["impacts"][0]["from"], "Learning");
    assert_eq!(body["impacts"][0]["to"], "Internal");
    assert_eq!(body["lowest"]["name"], "Learning");

    scorecard()
        .args(["--seed", seed, "evaluate"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Low performance in Learning (10.00%) may affect Internal.",
        ))
        .stdout(predicate::str::contains("Customer: (No KPI data)"));
}

#[test]
fn kpis_and_dependencies_as_json() {
    let temp = tempdir().unwrap();
    let seed = write_seed(temp.path(), LEARNING_SEED);
    let seed = seed.to_str().unwrap();

    let kpis = run_json(&["--seed", seed, "kpis", "--json"]);
    let order: Vec<&str> = kpis
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(order, vec!["Customer", "Financial", "Internal", "Learning"]);
    assert_eq!(kpis[3]["kpis"][0]["performance"], 10.0);

    let deps = run_json(&["--seed", seed, "dependencies", "--json"]);
    assert_eq!(deps[3]["name"], "Learning");
    assert_eq!(deps[3]["affects"], serde_json::json!(["Internal"]));
}

#[test]
fn invalid_seed_fails_with_reason() {
    let temp = tempdir().unwrap();
    let seed = write_seed(temp.path(), r#"{ "schema_version": 7 }"#);

    scorecard()
        .args(["--seed", seed.to_str().unwrap(), "perspectives"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("schema_version 7"));
}

#[test]
fn seed_over_capacity_is_rejected() {
    let temp = tempdir().unwrap();
    let seed = write_seed(
        temp.path(),
        r#"{ "schema_version": 1, "limits": { "max_perspectives": 2 },
             "perspectives": ["A", "B", "C"] }"#,
    );

    scorecard()
        .args(["--seed", seed.to_str().unwrap(), "perspectives"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("limit reached (2)"));
}
