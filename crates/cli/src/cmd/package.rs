//! Implementation of the `stamp package` command.
//!
//! This command configures the project and runs its packaging steps, writing
//! the primary, sources, javadoc and tests archives of every module plus the
//! dist bundle.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::debug;

use stamp_lib::artifact::StepId;
use stamp_lib::execute::{PackageOptions, PackageResult, package};
use stamp_lib::metadata::MetadataCell;

use super::load_project;
use crate::output::{
  OutputFormat, StepStatus, format_duration, format_size, print_done, print_field, print_json, print_step, short_hash,
};

#[derive(Serialize)]
struct PackageOutput<'a> {
  version: &'a str,
  success: bool,
  archives: Vec<ArchiveEntry<'a>>,
  failed: Vec<FailedEntry<'a>>,
  skipped: Vec<SkippedEntry<'a>>,
  duration_ms: u128,
}

#[derive(Serialize)]
struct ArchiveEntry<'a> {
  step: &'a StepId,
  path: &'a Path,
  sha256: Option<&'a str>,
}

#[derive(Serialize)]
struct FailedEntry<'a> {
  step: &'a StepId,
  error: String,
}

#[derive(Serialize)]
struct SkippedEntry<'a> {
  step: &'a StepId,
  failed_dependency: &'a StepId,
}

/// Execute the package command.
///
/// Prints every archive written along with failed and skipped steps.
///
/// # Errors
///
/// Fails when the project cannot be configured, and after printing the
/// summary when any step failed or was skipped.
pub fn cmd_package(
  dir: &Path,
  cell: &MetadataCell,
  jobs: Option<usize>,
  out_dir: Option<PathBuf>,
  output: OutputFormat,
) -> Result<()> {
  let start = Instant::now();
  let ctx = Arc::new(load_project(dir, cell)?);

  let mut options = PackageOptions {
    output_dir: out_dir,
    ..PackageOptions::default()
  };
  if let Some(jobs) = jobs {
    options.parallelism = jobs.max(1);
  }

  debug!(parallelism = options.parallelism, "running packaging steps");

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let result = rt.block_on(package(&ctx, &options)).context("Packaging failed")?;
  let elapsed = start.elapsed();

  if output.is_json() {
    print_json(&PackageOutput {
      version: ctx.metadata().version().as_str(),
      success: result.is_success(),
      archives: result
        .archives()
        .map(|(step, path, hash)| ArchiveEntry {
          step,
          path,
          sha256: hash.map(|h| h.0.as_str()),
        })
        .collect(),
      failed: result
        .failed
        .iter()
        .map(|(step, err)| FailedEntry {
          step,
          error: err.to_string(),
        })
        .collect(),
      skipped: result
        .skipped
        .iter()
        .map(|(step, dep)| SkippedEntry {
          step,
          failed_dependency: dep,
        })
        .collect(),
      duration_ms: elapsed.as_millis(),
    })?;
  } else {
    print_summary(&result, &format_duration(elapsed));
  }

  if !result.is_success() {
    bail!(
      "{} step(s) failed, {} step(s) skipped",
      result.failed.len(),
      result.skipped.len()
    );
  }

  Ok(())
}

fn print_summary(result: &PackageResult, duration: &str) {
  for (step, path, hash) in result.archives() {
    let size = fs::metadata(path).map(|m| format_size(m.len())).unwrap_or_default();
    let hash = hash.map(|h| short_hash(&h.0)).unwrap_or_default();
    print_step(
      StepStatus::Completed,
      step,
      &format!("{} ({}, {})", path.display(), size, hash),
    );
  }
  for (step, err) in &result.failed {
    print_step(StepStatus::Failed, step, &format!("failed: {}", err));
  }
  for (step, dep) in &result.skipped {
    print_step(StepStatus::Skipped, step, &format!("skipped, {} failed", dep));
  }

  println!();
  if result.is_success() {
    print_done("Packaging complete!");
  }
  print_field("Steps", result.total());
  print_field("Duration", duration);
}
