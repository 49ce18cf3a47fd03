//! Plan command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn plan_lists_waves_and_outputs() {
  let env = TestEnv::from_fixture("minimal.toml");

  env
    .stamp_cmd()
    .arg("plan")
    .assert()
    .success()
    .stdout(predicate::str::contains("Steps: 8"))
    .stdout(predicate::str::contains("Wave 3:"))
    .stdout(predicate::str::contains("engine:sourcesJar → engine:classes"))
    .stdout(predicate::str::contains("engine-2.0.0-SNAPSHOT-tests.jar"));
}

#[test]
fn plan_does_not_write_archives() {
  let env = TestEnv::from_fixture("minimal.toml");
  env.write_module_outputs("");

  env.stamp_cmd().arg("plan").assert().success();

  assert!(!env.output_path().exists());
}

#[test]
fn plan_json_output() {
  let env = TestEnv::from_fixture("multi_module.toml");

  let output = env
    .stamp_cmd()
    .args(["plan", "-o", "json"])
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();
  let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

  let waves = json["waves"].as_array().unwrap();
  assert_eq!(waves.len(), 3);
  assert_eq!(waves[2][0]["module"], "suite");
  assert_eq!(waves[2][0]["kind"], "dist");

  let modules = json["modules"].as_array().unwrap();
  assert_eq!(modules.len(), 3);
  assert_eq!(modules[0]["outputs"][0]["file_name"], "api-1.4.0-SNAPSHOT.jar");
  assert_eq!(modules[0]["outputs"][1]["classifier"], "sources");
  assert!(modules[2]["outputs"].as_array().unwrap().is_empty());
}
