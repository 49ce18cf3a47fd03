//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};
use std::process;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Run git in `dir` with a fixed identity and return trimmed stdout.
pub fn git(dir: &Path, args: &[&str]) -> String {
  let output = process::Command::new("git")
    .args(["-c", "user.name=stamp", "-c", "user.email=stamp@example.invalid"])
    .args(["-c", "commit.gpgsign=false", "-c", "init.defaultBranch=main"])
    .args(args)
    .current_dir(dir)
    .env("GIT_CONFIG_NOSYSTEM", "1")
    .env_remove("GIT_DIR")
    .env_remove("GIT_WORK_TREE")
    .output()
    .unwrap_or_else(|e| panic!("failed to run git {:?}: {}", args, e));

  assert!(
    output.status.success(),
    "git {:?} failed: {}",
    args,
    String::from_utf8_lossy(&output.stderr)
  );
  String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Isolated test project.
///
/// Each test gets its own temporary directory holding a git repository with
/// one commit and a `stamp.toml`.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Create from a fixture file.
  ///
  /// Copies the fixture content to `stamp.toml` and commits once.
  pub fn from_fixture(name: &str) -> Self {
    let env = Self::empty();
    env.write_file("stamp.toml", &fixture_content(name));
    git(env.root(), &["init", "-q"]);
    git(env.root(), &["commit", "--allow-empty", "-q", "-m", "initial"]);
    env
  }

  /// Create an empty directory without a repository.
  pub fn empty() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  pub fn root(&self) -> &Path {
    self.temp.path()
  }

  /// Write a file relative to the project root.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Lay out compiled classes, sources, docs and test classes of a module
  /// rooted at `module_dir` (relative to the project root).
  pub fn write_module_outputs(&self, module_dir: &str) {
    let prefix = if module_dir.is_empty() {
      String::new()
    } else {
      format!("{}/", module_dir)
    };
    self.write_file(&format!("{prefix}src/main/java/org/example/Engine.java"), "class Engine {}\n");
    self.write_file(&format!("{prefix}build/classes/java/main/org/example/Engine.class"), "engine-bytes");
    self.write_file(&format!("{prefix}build/docs/javadoc/index.html"), "<html></html>\n");
    self.write_file(&format!("{prefix}build/classes/java/test/org/example/EngineTest.class"), "test-bytes");
  }

  /// Full id of HEAD.
  pub fn head(&self) -> String {
    git(self.root(), &["rev-parse", "HEAD"])
  }

  /// Archive output directory of the project.
  pub fn output_path(&self) -> PathBuf {
    self.root().join("build").join("libs")
  }

  /// Get a pre-configured Command for the stamp binary running a local build.
  ///
  /// Removes the CI variables so results do not depend on the machine
  /// running the tests.
  pub fn stamp_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("stamp");
    cmd.current_dir(self.root());
    cmd.env_remove("CI");
    cmd.env_remove("CIRCLE_BUILD_NUM");
    cmd.env_remove("GIT_DIR");
    cmd.env_remove("RUST_LOG");
    cmd
  }

  /// Like [`TestEnv::stamp_cmd`], but running as CI build `build_number`.
  pub fn stamp_ci_cmd(&self, build_number: &str) -> Command {
    let mut cmd = self.stamp_cmd();
    cmd.env("CI", "true");
    cmd.env("CIRCLE_BUILD_NUM", build_number);
    cmd
  }
}
