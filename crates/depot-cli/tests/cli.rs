//! Integration tests for the `depot` binary

use assert_cmd::cargo::cargo_bin_cmd;
use depot_algo::test_utils::REFERENCE_TOTAL_DEMAND;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_sample(dir: &Path, name: &str, k: usize) -> String {
    let path = dir.join(name);
    let mut cmd = cargo_bin_cmd!("depot");
    cmd.args([
        "sample",
        "--facilities",
        &k.to_string(),
        "--out",
        path.to_str().unwrap(),
    ])
    .assert()
    .success();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_help_lists_commands() {
    let mut cmd = cargo_bin_cmd!("depot");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("solve"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("sample"))
        .stdout(predicate::str::contains("solvers"));
}

#[test]
fn test_solve_help() {
    let mut cmd = cargo_bin_cmd!("depot");
    cmd.args(["solve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--facilities"))
        .stdout(predicate::str::contains("--time-limit"))
        .stdout(predicate::str::contains("--solver"));
}

#[test]
fn test_solvers_lists_microlp() {
    let mut cmd = cargo_bin_cmd!("depot");
    cmd.arg("solvers")
        .assert()
        .success()
        .stdout(predicate::str::contains("microlp"));
}

#[test]
fn test_sample_prints_toml() {
    let mut cmd = cargo_bin_cmd!("depot");
    cmd.arg("sample")
        .assert()
        .success()
        .stdout(predicate::str::contains("facilities_to_open = 2"))
        .stdout(predicate::str::contains("[[distribution_centers]]"))
        .stdout(predicate::str::contains("Indian Cabins, AB"));
}

#[test]
fn test_validate_sample() {
    let tmp = tempdir().unwrap();
    let instance = write_sample(tmp.path(), "net.toml", 2);

    let mut cmd = cargo_bin_cmd!("depot");
    cmd.args(["validate", &instance])
        .assert()
        .success()
        .stdout(predicate::str::contains("Candidate DCs: 6"))
        .stdout(predicate::str::contains("Stores: 10"))
        .stdout(predicate::str::contains(format!(
            "Total demand: {}",
            REFERENCE_TOTAL_DEMAND
        )))
        .stdout(predicate::str::contains("78 variables"));
}

#[test]
fn test_validate_reports_missing_lane() {
    let tmp = tempdir().unwrap();
    let instance = write_sample(tmp.path(), "net.toml", 2);
    let text = fs::read_to_string(&instance).unwrap();
    // drop the final truck lane (DC6 -> Store10)
    let cut = text.rfind("[[truck_distances]]").unwrap();
    fs::write(&instance, &text[..cut]).unwrap();

    let mut cmd = cargo_bin_cmd!("depot");
    cmd.args(["validate", &instance])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DC6 -> Store10"));
}

#[test]
fn test_solve_sample_opens_two_dcs() {
    let tmp = tempdir().unwrap();
    let instance = write_sample(tmp.path(), "net.toml", 2);
    let out = tmp.path().join("solution.json");

    let mut cmd = cargo_bin_cmd!("depot");
    cmd.args(["solve", &instance, "--out", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hamilton, ON"))
        .stdout(predicate::str::contains("Indian Cabins, AB"))
        .stdout(predicate::str::contains("Solution written to"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["status"], "optimal");
    assert_eq!(json["open_dcs"], serde_json::json!(["DC1", "DC6"]));
    assert_eq!(json["assignments"].as_array().unwrap().len(), 10);
    let total = json["total_cost"].as_f64().unwrap();
    assert!((total - 4_890_521_060.0).abs() < 1.0, "total cost {total}");
}

#[test]
fn test_solve_single_facility_json() {
    let tmp = tempdir().unwrap();
    let instance = write_sample(tmp.path(), "net.json", 2);

    let mut cmd = cargo_bin_cmd!("depot");
    let output = cmd
        .args(["solve", &instance, "--facilities", "1", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["facilities_to_open"], 1);
    let inbound: f64 = json["shipments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["quantity"].as_f64().unwrap())
        .sum();
    assert_eq!(inbound, REFERENCE_TOTAL_DEMAND);
}

#[test]
fn test_solve_too_many_facilities_fails() {
    let tmp = tempdir().unwrap();
    let instance = write_sample(tmp.path(), "net.toml", 2);

    let mut cmd = cargo_bin_cmd!("depot");
    cmd.args(["solve", &instance, "--facilities", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("infeasible model"))
        .stdout(predicate::str::contains("OPEN DC").not());
}

#[test]
fn test_solve_rejects_unknown_solver() {
    let tmp = tempdir().unwrap();
    let instance = write_sample(tmp.path(), "net.toml", 2);

    let mut cmd = cargo_bin_cmd!("depot");
    cmd.args(["solve", &instance, "--solver", "gurobi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown milp solver"));
}

#[test]
fn test_solve_reads_config_file() {
    let tmp = tempdir().unwrap();
    let instance = write_sample(tmp.path(), "net.toml", 1);
    let config = tmp.path().join("depot.toml");
    fs::write(&config, "[solver]\nbinary_threshold = 1.5\n").unwrap();

    let mut cmd = cargo_bin_cmd!("depot");
    cmd.args(["solve", &instance, "--config", config.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("binary_threshold"));
}

#[test]
fn test_solve_missing_instance_fails() {
    let mut cmd = cargo_bin_cmd!("depot");
    cmd.args(["solve", "does-not-exist.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading instance file"));
}
