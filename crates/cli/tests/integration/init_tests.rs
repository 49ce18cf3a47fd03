//! Init command integration tests.

use predicates::prelude::*;

use super::common::{TestEnv, git};

#[test]
fn init_then_version() {
  let env = TestEnv::empty();
  let project = env.root().join("chess");

  env
    .stamp_cmd()
    .arg("init")
    .arg(&project)
    .assert()
    .success()
    .stdout(predicate::str::contains("Initialized chess!"));

  git(&project, &["init", "-q"]);
  git(&project, &["commit", "--allow-empty", "-q", "-m", "initial"]);

  env
    .stamp_cmd()
    .arg("version")
    .arg("-C")
    .arg(&project)
    .assert()
    .success()
    .stdout("0.1.0-SNAPSHOT\n");
}

#[test]
fn init_with_name() {
  let env = TestEnv::empty();

  env
    .stamp_cmd()
    .args(["init", ".", "--name", "engine"])
    .assert()
    .success();

  let content = std::fs::read_to_string(env.root().join("stamp.toml")).unwrap();
  assert!(content.contains("name = \"engine\""));
}
