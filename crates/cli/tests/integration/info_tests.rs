//! Info command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn info_shows_metadata() {
  let env = TestEnv::from_fixture("minimal.toml");

  env
    .stamp_ci_cmd("12")
    .arg("info")
    .assert()
    .success()
    .stdout(predicate::str::contains("engine 2.0.0-12."))
    .stdout(predicate::str::contains("Build number: 12"))
    .stdout(predicate::str::contains(env.head()))
    .stdout(predicate::str::contains("Implementation-Title: engine"));
}

#[test]
fn info_local_build_has_no_build_number() {
  let env = TestEnv::from_fixture("minimal.toml");

  env
    .stamp_cmd()
    .arg("info")
    .assert()
    .success()
    .stdout(predicate::str::contains("CI: no"))
    .stdout(predicate::str::contains("Build number").not());
}

#[test]
fn info_json_output() {
  let env = TestEnv::from_fixture("multi_module.toml");

  let output = env
    .stamp_cmd()
    .args(["info", "-o", "json"])
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();
  let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

  assert_eq!(json["project"], "suite");
  assert_eq!(json["metadata"]["version"], "1.4.0-SNAPSHOT");
  assert_eq!(json["metadata"]["commit_id"], env.head());
  assert_eq!(json["metadata"]["is_ci"], false);

  // modules without a compile step have no manifest
  let manifest = json["manifest"].as_array().unwrap();
  assert_eq!(manifest.len(), 2);
  assert_eq!(manifest[0]["module"], "api");
  assert_eq!(manifest[0]["attributes"][0][0], "Manifest-Version");
  assert_eq!(manifest[0]["attributes"][1][1], "org.example.suite");
}
