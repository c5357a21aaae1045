//! End-to-end tests for the `csb` binary.
//!
//! Each test runs `csb` as a subprocess; scenario files live in temp dirs.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

fn csb_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("csb"));
    // stderr carries JSON errors in some tests; keep tracing off it.
    cmd.env("CSB_LOG", "off");
    cmd
}

fn write_file(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).expect("write scenario file");
    path
}

const TWO_AWAY_JSON: &str = r#"{
  "name": "two away",
  "away": [2, 4],
  "expected": 1,
  "agents": [
    {"id": 1, "score": 60}, {"id": 2, "score": 20},
    {"id": 3, "score": 95}, {"id": 4, "score": 75}
  ],
  "customers": [
    {"id": 1, "score": 90}, {"id": 2, "score": 20}, {"id": 3, "score": 70},
    {"id": 4, "score": 40}, {"id": 5, "score": 60}, {"id": 6, "score": 10}
  ]
}"#;

// ---------------------------------------------------------------------------
// csb run
// ---------------------------------------------------------------------------

#[test]
fn run_json_scenario_reports_winner() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_file(dir.path(), "two_away.json", TWO_AWAY_JSON);

    let output = csb_cmd()
        .args(["run", path.to_str().expect("utf8 path"), "--json"])
        .output()
        .expect("run should not crash");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["winner_id"], 1);
    assert_eq!(json["matches_expected"], true);
    assert_eq!(json["outcome"]["outcome"], "winner");
}

#[test]
fn run_toml_scenario_with_explain() {
    let dir = TempDir::new().expect("tempdir");
    let body = r#"
name = "shared leader"
expected = 0

agents = [
  { id = 1, score = 3 },
  { id = 2, score = 7 },
  { id = 3, score = 7 },
]
customers = [
  { id = 1, score = 1 }, { id = 2, score = 2 }, { id = 3, score = 3 },
  { id = 4, score = 4 }, { id = 5, score = 5 }, { id = 6, score = 6 },
  { id = 7, score = 7 },
]
"#;
    let path = write_file(dir.path(), "shared.toml", body);

    csb_cmd()
        .args(["run", path.to_str().expect("utf8 path"), "--explain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no unique winner"))
        .stdout(predicate::str::contains("shared score"));
}

#[test]
fn run_mismatched_expectation_exits_nonzero() {
    let dir = TempDir::new().expect("tempdir");
    let body = TWO_AWAY_JSON.replace("\"expected\": 1", "\"expected\": 3");
    let path = write_file(dir.path(), "wrong.json", &body);

    csb_cmd()
        .args(["run", path.to_str().expect("utf8 path")])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("MISMATCH"))
        .stderr(predicate::str::contains("error[E3001]"));
}

#[test]
fn run_mismatch_json_reports_error_code() {
    let dir = TempDir::new().expect("tempdir");
    let body = TWO_AWAY_JSON.replace("\"expected\": 1", "\"expected\": 3");
    let path = write_file(dir.path(), "wrong.json", &body);

    let output = csb_cmd()
        .args(["run", path.to_str().expect("utf8 path"), "--json"])
        .output()
        .expect("run should not crash");
    assert_eq!(output.status.code(), Some(1));

    let report: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(report["matches_expected"], false);
    let error: Value = serde_json::from_slice(&output.stderr).expect("JSON error");
    assert_eq!(error["error"]["error_code"], "E3001");
}

#[test]
fn inline_wrong_expectation_reports_error_code() {
    csb_cmd()
        .args(["inline", "--agents", "11,21,31", "--customers", "10,20,30", "--expect", "2"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("E3001"));
}

#[test]
fn run_missing_score_fails_with_code() {
    let dir = TempDir::new().expect("tempdir");
    let body = r#"{"name": "broken", "agents": [{"id": 1}], "customers": []}"#;
    let path = write_file(dir.path(), "broken.json", body);

    csb_cmd()
        .args(["run", path.to_str().expect("utf8 path")])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("E1002"));
}

#[test]
fn run_duplicate_agent_ids_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let body = r#"{"name": "dup", "agents": [{"id": 1, "score": 1}, {"id": 1, "score": 2}], "customers": []}"#;
    let path = write_file(dir.path(), "dup.json", body);

    let output = csb_cmd()
        .args(["run", path.to_str().expect("utf8 path"), "--json"])
        .output()
        .expect("run should not crash");
    assert_eq!(output.status.code(), Some(2));
    let json: Value = serde_json::from_slice(&output.stderr).expect("JSON error");
    assert_eq!(json["error"]["error_code"], "E2001");
}

#[test]
fn run_unknown_extension_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_file(dir.path(), "roster.yaml", "name: x");

    csb_cmd()
        .args(["run", path.to_str().expect("utf8 path")])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("E1003"));
}

// ---------------------------------------------------------------------------
// csb inline
// ---------------------------------------------------------------------------

#[test]
fn inline_scores_pick_winner() {
    csb_cmd()
        .args([
            "inline",
            "--agents",
            "100,99,88,3,4,5",
            "--customers",
            "10,10,10,20,20,30,30,30,20,60",
            "--away",
            "4,5,6",
            "--expect",
            "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("agent 3"));
}

#[test]
fn inline_tie_reports_zero() {
    let output = csb_cmd()
        .args([
            "inline",
            "--agents",
            "11,21,31,3,4,5",
            "--customers",
            "10,10,10,20,20,30,30,30,20,60",
            "--json",
        ])
        .output()
        .expect("inline should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["winner_id"], 0);
    assert_eq!(json["outcome"]["outcome"], "no_unique_winner");
}

// ---------------------------------------------------------------------------
// csb scenarios / csb sim
// ---------------------------------------------------------------------------

#[test]
fn builtin_scenarios_all_pass() {
    let output = csb_cmd()
        .args(["scenarios", "--json"])
        .output()
        .expect("scenarios should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["total"], 8);
    assert_eq!(json["all_passed"], true);
}

#[test]
fn scenarios_filter_narrows_set() {
    csb_cmd()
        .args(["scenarios", "--filter", "large"])
        .assert()
        .success()
        .stdout(predicate::str::contains("large-skewed"))
        .stdout(predicate::str::contains("1/1 passed"));
}

#[test]
fn sim_run_small_campaign_passes() {
    let output = csb_cmd()
        .args(["sim", "run", "--seeds", "50", "--json"])
        .output()
        .expect("sim should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["seeds_run"], 50);
    assert_eq!(json["seeds_passed"], 50);
}

#[test]
fn sim_replay_prints_seed() {
    csb_cmd()
        .args(["sim", "replay", "--seed", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Seed 7"))
        .stdout(predicate::str::contains("oracle:"));
}
