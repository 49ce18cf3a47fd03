//! Version command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

fn stdout_of(cmd: &mut assert_cmd::Command) -> String {
  let output = cmd.assert().success().get_output().stdout.clone();
  String::from_utf8(output).unwrap().trim().to_string()
}

#[test]
fn local_build_prints_snapshot() {
  let env = TestEnv::from_fixture("minimal.toml");

  env
    .stamp_cmd()
    .arg("version")
    .assert()
    .success()
    .stdout("2.0.0-SNAPSHOT\n");
}

#[test]
fn ci_build_prints_build_number_and_commit() {
  let env = TestEnv::from_fixture("minimal.toml");

  let version = stdout_of(env.stamp_ci_cmd("417").arg("version"));

  let abbreviated = version.strip_prefix("2.0.0-417.").expect("unexpected version format");
  assert!(abbreviated.len() >= 7, "abbreviated id too short: {abbreviated}");
  assert!(env.head().starts_with(abbreviated));
}

#[test]
fn ci_without_build_number_keeps_separator() {
  let env = TestEnv::from_fixture("minimal.toml");

  let version = stdout_of(env.stamp_cmd().env("CI", "1").arg("version"));

  assert!(version.starts_with("2.0.0-."), "unexpected version: {version}");
}

#[test]
fn dir_flag_selects_project() {
  let env = TestEnv::from_fixture("minimal.toml");
  let elsewhere = TestEnv::empty();

  env
    .stamp_cmd()
    .current_dir(elsewhere.root())
    .arg("version")
    .arg("-C")
    .arg(env.root())
    .assert()
    .success()
    .stdout("2.0.0-SNAPSHOT\n");
}

#[test]
fn version_is_stable_across_invocations() {
  let env = TestEnv::from_fixture("minimal.toml");

  let first = stdout_of(env.stamp_ci_cmd("9").arg("version"));
  let second = stdout_of(env.stamp_ci_cmd("9").arg("version"));

  assert_eq!(first, second);
}

#[test]
fn new_commit_changes_ci_version() {
  let env = TestEnv::from_fixture("minimal.toml");
  let first = stdout_of(env.stamp_ci_cmd("9").arg("version"));

  super::common::git(env.root(), &["commit", "--allow-empty", "-q", "-m", "second"]);
  let second = stdout_of(env.stamp_ci_cmd("9").arg("version"));

  assert_ne!(first, second);
}

#[test]
fn missing_repository_names_commit_resolution() {
  let env = TestEnv::empty();
  env.write_file("stamp.toml", &super::common::fixture_content("minimal.toml"));

  env
    .stamp_cmd()
    .env("GIT_CEILING_DIRECTORIES", env.root().parent().unwrap())
    .arg("version")
    .assert()
    .failure()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("failed to resolve commit"));
}

#[test]
fn empty_repository_fails() {
  let env = TestEnv::empty();
  env.write_file("stamp.toml", &super::common::fixture_content("minimal.toml"));
  super::common::git(env.root(), &["init", "-q"]);

  env
    .stamp_cmd()
    .arg("version")
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to resolve commit"));
}

#[test]
fn missing_descriptor_fails() {
  let env = TestEnv::empty();

  env
    .stamp_cmd()
    .arg("version")
    .assert()
    .failure()
    .stderr(predicate::str::contains("no stamp.toml found"));
}

#[test]
fn invalid_base_version_fails() {
  let env = TestEnv::empty();
  env.write_file("stamp.toml", "[project]\nname = \"engine\"\nversion = \"two\"\n");

  env
    .stamp_cmd()
    .arg("version")
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid project version"));
}
