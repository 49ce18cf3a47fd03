//! Types for packaging step execution.
//!
//! This module defines the error types, result types, and configuration
//! for executing the step graph of a configured build.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::archive::ArchiveError;
use crate::artifact::StepId;
use crate::dist::DistError;
use crate::util::hash::{ContentHash, HashError};

/// Errors that abort execution as a whole.
#[derive(Debug, Error)]
pub enum ExecuteError {
  /// Cycle detected in the step graph.
  #[error("dependency cycle detected")]
  CycleDetected,

  /// A dependency refers to a step that was never added.
  #[error("unknown step: {0}")]
  UnknownStep(StepId),

  /// A step task panicked or was cancelled.
  #[error("step task failed: {0}")]
  Join(#[from] tokio::task::JoinError),

  /// The parallelism semaphore was closed.
  #[error("step scheduler closed")]
  SchedulerClosed,
}

/// Errors of a single step. They fail the step and skip its dependents.
#[derive(Debug, Error)]
pub enum StepError {
  /// The external tool did not produce the step's output directory.
  #[error("output of {step} not found at {}", path.display())]
  MissingOutput { step: StepId, path: PathBuf },

  /// The step belongs to a module the build does not have.
  #[error("unknown module '{0}'")]
  UnknownModule(String),

  /// No packaging artifact was declared for the step.
  #[error("no artifact declared for {0}")]
  UndeclaredArtifact(StepId),

  #[error("archive error: {0}")]
  Archive(#[from] ArchiveError),

  #[error("dist error: {0}")]
  Dist(#[from] DistError),

  #[error("hash error: {0}")]
  Hash(#[from] HashError),
}

/// Output of a successful step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutput {
  /// The archive written by a packaging step. `None` for external steps.
  pub archive: Option<PathBuf>,
  /// SHA-256 of `archive`.
  pub sha256: Option<ContentHash>,
}

/// Result of executing the step graph.
#[derive(Debug, Default)]
pub struct PackageResult {
  /// Successfully completed steps.
  pub completed: BTreeMap<StepId, StepOutput>,

  /// Steps that failed during execution.
  pub failed: BTreeMap<StepId, StepError>,

  /// Steps that were not run because a dependency failed or was skipped.
  /// Maps skipped step -> the dependency that caused the skip.
  pub skipped: BTreeMap<StepId, StepId>,
}

impl PackageResult {
  /// Returns true if every step completed.
  pub fn is_success(&self) -> bool {
    self.failed.is_empty() && self.skipped.is_empty()
  }

  /// Returns the total number of steps processed.
  pub fn total(&self) -> usize {
    self.completed.len() + self.failed.len() + self.skipped.len()
  }

  /// Archives written, in step order.
  pub fn archives(&self) -> impl Iterator<Item = (&StepId, &Path, Option<&ContentHash>)> {
    self
      .completed
      .iter()
      .filter_map(|(step, output)| output.archive.as_deref().map(|path| (step, path, output.sha256.as_ref())))
  }
}

/// Configuration for packaging.
#[derive(Debug, Clone)]
pub struct PackageOptions {
  /// Maximum number of steps to execute in parallel.
  pub parallelism: usize,

  /// Archive output directory. Defaults to the project's configured one.
  pub output_dir: Option<PathBuf>,
}

impl Default for PackageOptions {
  fn default() -> Self {
    Self {
      parallelism: num_cpus(),
      output_dir: None,
    }
  }
}

/// Get the number of CPUs for default parallelism.
fn num_cpus() -> usize {
  std::thread::available_parallelism().map(|p| p.get()).unwrap_or(4)
}
