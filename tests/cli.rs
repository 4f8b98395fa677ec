use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn cli_help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("report-builder").expect("Binary exists");
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("query").and(predicate::str::contains("demo")));
}

/// The demo subcommand needs no network: it builds a report through the
/// store and prints its wire-shape JSON.
#[test]
fn cli_demo_prints_wire_shape_report() {
    let mut cmd = Command::cargo_bin("report-builder").expect("Binary exists");
    cmd.arg("demo");
    cmd.assert().success().stdout(
        predicate::str::contains("\"category\": \"markdown\"")
            .and(predicate::str::contains("\"category\": \"query\""))
            .and(predicate::str::contains("Example Report")),
    );
}

/// A query against an unroutable endpoint must degrade to a clean non-zero
/// exit, never a panic.
#[test]
fn cli_query_against_dead_endpoint_fails_cleanly() {
    let mut cmd = Command::cargo_bin("report-builder").expect("Binary exists");
    cmd.arg("query")
        .arg("anything")
        .env("REPORT_API_BASE", "http://127.0.0.1:9/api/v0");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no result"));
}
