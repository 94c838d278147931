//! End-to-end runs of the `wifi-provision` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// `wifi-provision` running in `dir` with a clean provisioning environment
/// and no terminal, so answers can only come from stdin.
fn provision_cmd(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo_bin_cmd!("wifi-provision");
    cmd.current_dir(dir)
        .env_remove("WIFI_CREDENTIALS_PATH")
        .env_remove("WIFI_PROVISION_INTEGRATION_DUMP")
        .env_remove("WIFI_PROVISION_CARGO_WARNINGS")
        .env("WIFI_PROVISION_TTY", "none");
    cmd
}

fn write_credentials(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn reads_credentials_file() {
    let tmp = TempDir::new().unwrap();
    write_credentials(tmp.path(), "credentials.json", r#"{"ssid": "net", "passwd": "pw"}"#);

    provision_cmd(tmp.path())
        .assert()
        .success()
        .stdout(
            "cargo:rerun-if-changed=credentials.json\n\
             cargo:rerun-if-env-changed=WIFI_CREDENTIALS_PATH\n\
             cargo:rerun-if-env-changed=WIFI_PROVISION_INTEGRATION_DUMP\n\
             cargo:rerun-if-env-changed=WIFI_PROVISION_TTY\n\
             cargo:rustc-env=EXAMPLE_WIFI_SSID=net\n\
             cargo:rustc-env=EXAMPLE_WIFI_PASSWORD=pw\n",
        )
        .stderr(predicate::str::contains("credentials.json found"));
}

#[test]
fn prompts_on_stdin_when_file_is_missing() {
    let tmp = TempDir::new().unwrap();

    provision_cmd(tmp.path())
        .args(["--format", "cpp"])
        .write_stdin("net\npw\n")
        .assert()
        .success()
        .stdout("EXAMPLE_WIFI_SSID=\"net\"\nEXAMPLE_WIFI_PASSWORD=\"pw\"\n")
        .stderr(
            predicate::str::contains("credentials.json cannot be found")
                .and(predicate::str::contains("SSID:"))
                .and(predicate::str::contains("Password:")),
        );
}

#[test]
fn stdin_flag_bypasses_the_terminal() {
    let tmp = TempDir::new().unwrap();

    provision_cmd(tmp.path())
        .env_remove("WIFI_PROVISION_TTY")
        .args(["--stdin", "--format", "shell"])
        .write_stdin("net\npw\n")
        .assert()
        .success()
        .stdout("export EXAMPLE_WIFI_SSID='net'\nexport EXAMPLE_WIFI_PASSWORD='pw'\n");
}

#[test]
fn missing_answers_fail_the_run() {
    let tmp = TempDir::new().unwrap();

    provision_cmd(tmp.path())
        .write_stdin("net\n")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("input ended before answering"));
}

#[test]
fn path_from_environment() {
    let tmp = TempDir::new().unwrap();
    write_credentials(tmp.path(), "wifi.json", r#"{"ssid": "office", "passwd": "it's"}"#);

    provision_cmd(tmp.path())
        .env("WIFI_CREDENTIALS_PATH", "wifi.json")
        .args(["--format", "shell"])
        .assert()
        .success()
        .stdout("export EXAMPLE_WIFI_SSID='office'\nexport EXAMPLE_WIFI_PASSWORD='it'\\''s'\n");
}

#[test]
fn path_from_dotenv() {
    let tmp = TempDir::new().unwrap();
    write_credentials(tmp.path(), "wifi.json", r#"{"ssid": "lab", "passwd": "pw"}"#);
    fs::write(tmp.path().join(".env"), "WIFI_CREDENTIALS_PATH=wifi.json\n").unwrap();

    provision_cmd(tmp.path())
        .args(["--format", "cpp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("EXAMPLE_WIFI_SSID=\"lab\""));
}

#[test]
fn integration_dump_emits_nothing() {
    let tmp = TempDir::new().unwrap();
    write_credentials(tmp.path(), "credentials.json", "not json");

    provision_cmd(tmp.path())
        .env("WIFI_PROVISION_INTEGRATION_DUMP", "true")
        .args(["--format", "cpp"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    provision_cmd(tmp.path())
        .args(["--integration-dump", "--format", "cpp"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn integration_dump_keeps_cargo_rebuild_triggers() {
    let tmp = TempDir::new().unwrap();

    provision_cmd(tmp.path())
        .arg("--integration-dump")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("cargo:rerun-if-env-changed=WIFI_PROVISION_INTEGRATION_DUMP")
                .and(predicate::str::contains("rustc-env").not()),
        );
}

#[test]
fn integration_dump_from_dotenv() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".env"), "WIFI_PROVISION_INTEGRATION_DUMP=1\n").unwrap();

    provision_cmd(tmp.path())
        .args(["--format", "cpp"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn malformed_file_fails_without_prompting() {
    let tmp = TempDir::new().unwrap();
    write_credentials(tmp.path(), "credentials.json", r#"{"ssid": "net"}"#);

    provision_cmd(tmp.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(
            predicate::str::contains("not a valid credentials file")
                .and(predicate::str::contains("SSID:").not()),
        );
}

#[test]
fn cargo_warnings_stay_off_cli_stdout() {
    let tmp = TempDir::new().unwrap();
    let long_ssid = "s".repeat(40);
    write_credentials(
        tmp.path(),
        "credentials.json",
        &format!(r#"{{"ssid": "{long_ssid}", "passwd": "pw"}}"#),
    );

    provision_cmd(tmp.path())
        .env("WIFI_PROVISION_CARGO_WARNINGS", "true")
        .env_remove("OUT_DIR")
        .args(["--format", "cpp"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "EXAMPLE_WIFI_SSID=\"{long_ssid}\"\nEXAMPLE_WIFI_PASSWORD=\"pw\"\n"
        )))
        .stderr(predicate::str::contains("SSID is 40 bytes"));
}
