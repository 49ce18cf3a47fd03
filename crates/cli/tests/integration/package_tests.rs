//! Package command integration tests.

use std::fs;
use std::io::Read;
use std::path::Path;

use predicates::prelude::*;

use super::common::TestEnv;

fn entry_names(path: &Path) -> Vec<String> {
  let archive = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
  archive.file_names().map(str::to_string).collect()
}

fn read_entry(path: &Path, name: &str) -> String {
  let mut archive = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
  let mut content = String::new();
  archive.by_name(name).unwrap().read_to_string(&mut content).unwrap();
  content
}

#[test]
fn package_writes_all_archives() {
  let env = TestEnv::from_fixture("minimal.toml");
  env.write_module_outputs("");

  env
    .stamp_cmd()
    .arg("package")
    .assert()
    .success()
    .stdout(predicate::str::contains("Packaging complete!"));

  let out = env.output_path();
  for name in [
    "engine-2.0.0-SNAPSHOT.jar",
    "engine-2.0.0-SNAPSHOT-sources.jar",
    "engine-2.0.0-SNAPSHOT-javadoc.jar",
    "engine-2.0.0-SNAPSHOT-tests.jar",
    "engine-2.0.0-SNAPSHOT.zip",
  ] {
    assert!(out.join(name).is_file(), "missing {name}");
  }
}

#[test]
fn package_on_ci_stamps_manifest() {
  let env = TestEnv::from_fixture("minimal.toml");
  env.write_module_outputs("");

  let version = env.stamp_ci_cmd("417").arg("version").assert().success().get_output().stdout.clone();
  let version = String::from_utf8(version).unwrap().trim().to_string();
  assert!(version.starts_with("2.0.0-417."));

  env.stamp_ci_cmd("417").arg("package").assert().success();

  let jar = env.output_path().join(format!("engine-{version}.jar"));
  let manifest = read_entry(&jar, "META-INF/MANIFEST.MF");
  assert!(manifest.contains(&format!("Implementation-Version: {version}\r\n")));
  assert!(manifest.contains("Build-Number: 417\r\n"));
  assert!(manifest.contains(&format!("Commit-Id: {}\r\n", env.head())));
}

#[test]
fn package_is_reproducible() {
  let env = TestEnv::from_fixture("minimal.toml");
  env.write_module_outputs("");
  let jar = env.output_path().join("engine-2.0.0-SNAPSHOT-sources.jar");

  env.stamp_cmd().arg("package").assert().success();
  let first = fs::read(&jar).unwrap();
  env.stamp_cmd().arg("package").assert().success();
  let second = fs::read(&jar).unwrap();

  assert_eq!(first, second);
}

#[test]
fn missing_classes_fails_and_skips_dependents() {
  let env = TestEnv::from_fixture("minimal.toml");
  env.write_module_outputs("");
  fs::remove_dir_all(env.root().join("build/classes/java/main")).unwrap();

  env
    .stamp_cmd()
    .arg("package")
    .assert()
    .failure()
    .stderr(predicate::str::contains("engine:classes"))
    .stderr(predicate::str::contains("engine:jar skipped"))
    .stderr(predicate::str::contains("1 step(s) failed, 3 step(s) skipped"));

  let out = env.output_path();
  assert!(out.join("engine-2.0.0-SNAPSHOT-javadoc.jar").is_file());
  assert!(!out.join("engine-2.0.0-SNAPSHOT.jar").exists());
  assert!(!out.join("engine-2.0.0-SNAPSHOT.zip").exists());
}

#[test]
fn package_multi_module_dist() {
  let env = TestEnv::from_fixture("multi_module.toml");
  env.write_file("README.md", "# suite\n");
  env.write_module_outputs("api");
  env.write_module_outputs("impl");

  env.stamp_cmd().args(["package", "-j", "2"]).assert().success();

  let dist = env.output_path().join("suite-1.4.0-SNAPSHOT.zip");
  let names = entry_names(&dist);
  assert!(names.contains(&"suite-1.4.0-SNAPSHOT/README.md".to_string()));
  assert!(names.contains(&"suite-1.4.0-SNAPSHOT/api-1.4.0-SNAPSHOT.jar".to_string()));
  assert!(names.contains(&"suite-1.4.0-SNAPSHOT/impl-1.4.0-SNAPSHOT-sources.jar".to_string()));
  assert!(!names.iter().any(|n| n.ends_with("-tests.jar")));
}

#[test]
fn missing_explicit_include_fails_dist() {
  let env = TestEnv::from_fixture("multi_module.toml");
  env.write_module_outputs("api");
  env.write_module_outputs("impl");

  env
    .stamp_cmd()
    .arg("package")
    .assert()
    .failure()
    .stderr(predicate::str::contains("dist include not found"));
}

#[test]
fn package_json_output_and_out_dir() {
  let env = TestEnv::from_fixture("minimal.toml");
  env.write_module_outputs("");
  let out = env.root().join("custom-out");

  let output = env
    .stamp_cmd()
    .args(["package", "-o", "json", "--out-dir"])
    .arg(&out)
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();
  let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

  assert_eq!(json["success"], true);
  assert_eq!(json["version"], "2.0.0-SNAPSHOT");
  assert_eq!(json["archives"].as_array().unwrap().len(), 5);
  assert_eq!(json["archives"][0]["sha256"].as_str().unwrap().len(), 64);
  assert!(out.join("engine-2.0.0-SNAPSHOT.zip").is_file());
  assert!(!env.output_path().exists());
}

#[test]
fn configuration_failure_writes_nothing() {
  let env = TestEnv::empty();
  env.write_file("stamp.toml", &super::common::fixture_content("minimal.toml"));
  env.write_module_outputs("");

  env
    .stamp_cmd()
    .env("GIT_CEILING_DIRECTORIES", env.root().parent().unwrap())
    .arg("package")
    .assert()
    .failure();

  assert!(!env.output_path().exists());
}
