use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("oed").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("oed"));
}

#[test]
fn cli_rejects_bad_period() {
    let mut cmd = Command::cargo_bin("oed").unwrap();
    cmd.args(["compare", "--countries", "Germany", "--period", "banana"]);
    cmd.assert().failure();
}

// Live test (opt-in): cargo test --features online
#[cfg(feature = "online")]
#[test]
fn fetch_online_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("oed").unwrap();
    cmd.args(["--dir", dir.path().to_str().unwrap(), "fetch"]);
    cmd.assert().success();
}
