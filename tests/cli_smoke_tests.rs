mod common;

use assert_cmd::Command;
use common::{sample_records, TestEnv};
use fintrack_storage_json::JsonRecordStore;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use serde_json::Value;

const BIN_NAME: &str = "fintrack_cli";

fn cli(env: &TestEnv) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("FINTRACK_CONFIG", env.config());
    cmd.env("RUST_LOG", "off");
    cmd
}

#[test]
fn forecast_prints_table_with_anchor_and_events() {
    let env = TestEnv::new();
    cli(&env)
        .args(["forecast", env.records(), "--start", "2025-01-01", "--days", "30"])
        .assert()
        .success()
        .stdout(
            contains("Current Balance")
                .and(contains("Salary"))
                .and(contains("Rent"))
                .and(contains("$2,030.00")),
        );
}

#[test]
fn forecast_json_is_camel_case_and_starts_with_anchor() {
    let env = TestEnv::new();
    let output = cli(&env)
        .args(["forecast", env.records(), "--start", "2025-01-01", "--json"])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let items: Vec<Value> = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(items[0]["type"], "balance");
    assert_eq!(items[0]["itemId"], "current-balance");
    assert_eq!(items.len(), 5);
    assert_eq!(items.last().expect("last item")["runningBalance"], 2030.0);
}

#[test]
fn summary_reports_ending_balance() {
    let env = TestEnv::new();
    cli(&env)
        .args(["summary", env.records(), "--start", "2025-01-01", "--days", "60", "--expand"])
        .assert()
        .success()
        .stdout(contains("Ending balance").and(contains("2 income, 3 bill")));
}

#[test]
fn rollup_returns_one_row_per_day() {
    let env = TestEnv::new();
    let output = cli(&env)
        .args(["rollup", env.records(), "--start", "2025-01-01", "--days", "30"])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let response: Value = serde_json::from_slice(&output.stdout).expect("json output");
    let rows = response["forecast"].as_array().expect("forecast rows");
    assert_eq!(rows.len(), 31);
    assert_eq!(rows[0]["date"], "2025-01-01");
    assert!(rows[0].get("netChange").is_some());
}

#[test]
fn user_records_are_read_from_the_data_root() {
    let env = TestEnv::new();
    JsonRecordStore::new(env.store_root())
        .expect("store")
        .save_records(&sample_records())
        .expect("save");

    cli(&env)
        .args(["summary", "--user", "alice", "--start", "2025-01-01"])
        .assert()
        .success()
        .stdout(contains("$2,030.00"));
}

#[test]
fn check_reports_record_problems() {
    let env = TestEnv::new();
    cli(&env)
        .args(["check", env.records()])
        .assert()
        .success()
        .stdout(contains("4 records look usable."));
}

#[test]
fn missing_records_file_fails() {
    let env = TestEnv::new();
    cli(&env)
        .args(["forecast", "does-not-exist.json", "--start", "2025-01-01"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Error"));
}

#[test]
fn unknown_command_prints_usage() {
    let env = TestEnv::new();
    cli(&env)
        .arg("teleport")
        .assert()
        .failure()
        .code(2)
        .stderr(contains("Usage: fintrack_cli"));
}

#[test]
fn version_command_prints_version_info() {
    let env = TestEnv::new();
    cli(&env)
        .arg("version")
        .assert()
        .success()
        .stdout(contains("fintrack").and(contains(env!("CARGO_PKG_VERSION"))));
}

#[test]
fn config_set_changes_currency_formatting() {
    let env = TestEnv::new();
    cli(&env)
        .args(["config", "set", "currency", "eur"])
        .assert()
        .success()
        .stdout(contains("\"currency\": \"EUR\""));

    cli(&env)
        .args(["summary", env.records(), "--start", "2025-01-01"])
        .assert()
        .success()
        .stdout(contains("€2,030.00"));
}

#[test]
fn config_set_rejects_invalid_values() {
    let env = TestEnv::new();
    cli(&env)
        .args(["config", "set", "horizon", "0"])
        .assert()
        .failure()
        .stderr(contains("default_horizon_days"));
}
