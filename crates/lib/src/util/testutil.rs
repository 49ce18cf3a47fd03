//! Test utilities for stamp-lib.
//!
//! Repositories are created with the `git` binary so the tests exercise the
//! same on-disk layout users have.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Run git in `dir` with a fixed identity and return trimmed stdout.
pub fn git(dir: &Path, args: &[&str]) -> String {
  let output = Command::new("git")
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

/// Initialize an empty repository.
pub fn init_repo(dir: &Path) {
  git(dir, &["init", "-q"]);
}

/// Initialize a repository with a single empty commit.
pub fn init_repo_with_commit(dir: &Path) {
  init_repo(dir);
  git(dir, &["commit", "--allow-empty", "-q", "-m", "initial"]);
}

/// Write a file relative to `root`, creating parent directories.
pub fn write_file(root: &Path, relative_path: &str, content: &str) {
  let path = root.join(relative_path);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).unwrap();
  }
  fs::write(&path, content).unwrap();
}

/// Minimal descriptor for a single-module project.
pub const MINIMAL_PROJECT: &str = r#"
[project]
name = "engine"
version = "2.0.0"
"#;

/// Lay out the conventional single-module directories with one file each.
pub fn write_module_outputs(root: &Path) {
  write_file(root, "src/main/java/org/example/Engine.java", "class Engine {}\n");
  write_file(root, "build/classes/java/main/org/example/Engine.class", "engine-bytes");
  write_file(root, "build/docs/javadoc/index.html", "<html></html>\n");
  write_file(root, "build/classes/java/test/org/example/EngineTest.class", "test-bytes");
}
