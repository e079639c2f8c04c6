// tests/cli_test.rs
use assert_cmd::Command;
use predicates::prelude::*;

fn tag_gate() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tag-gate"));
    for var in [
        "GITLAB_URL",
        "GITLAB_TOKEN",
        "GITLAB_PROJECT_ID",
        "GITLAB_VERIFY_TLS",
        "TAG_NAME",
        "HOMOLOGATION_BRANCH",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help() {
    tag_gate()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tag-gate"))
        .stdout(predicate::str::contains("decide"))
        .stdout(predicate::str::contains("verify"));
}

#[test]
fn test_malformed_tag_exits_with_format_code() {
    tag_gate()
        .args([
            "decide",
            "--tag",
            "not-a-tag",
            "--gitlab-url",
            "http://127.0.0.1:9",
            "--private-token",
            "x",
            "--project-id",
            "1",
        ])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not-a-tag"));
}

#[test]
fn test_missing_connection_settings_exit_with_config_code() {
    tag_gate()
        .args(["--config", "/dev/null", "decide", "--tag", "v1.0.0"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("GitLab URL is not set"));
}

#[test]
fn test_tag_name_from_environment() {
    tag_gate()
        .env("TAG_NAME", "bogus")
        .arg("decide")
        .assert()
        .code(3);
}

#[test]
fn test_missing_subcommand_is_usage_error() {
    tag_gate().assert().code(2);
}
