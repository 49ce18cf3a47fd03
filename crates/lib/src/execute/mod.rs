//! Packaging execution.
//!
//! This module runs the step graph of a configured build. It handles:
//! - dependency ordering through [`StepGraph`] waves
//! - parallel execution of independent steps on the blocking pool
//! - failure propagation and skip tracking
//!
//! External steps are not run here; their tools have run before and the
//! executor only checks that their output directory exists.

pub mod dag;
pub mod types;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::archive::{ArchiveBuilder, output_path};
use crate::artifact::{StepId, StepKind};
use crate::context::BuildContext;
use crate::dist;
use crate::util::hash::hash_file;

pub use dag::StepGraph;
pub use types::{ExecuteError, PackageOptions, PackageResult, StepError, StepOutput};

type StepOutcome = (StepId, Result<StepOutput, StepError>);

/// Run every step of the build.
///
/// Steps run wave by wave; within a wave up to `options.parallelism` steps
/// run at once. A failing step does not abort the run: it is recorded in
/// [`PackageResult::failed`] and everything depending on it is recorded in
/// [`PackageResult::skipped`].
pub async fn package(ctx: &Arc<BuildContext>, options: &PackageOptions) -> Result<PackageResult, ExecuteError> {
  let dag = StepGraph::from_context(ctx)?;
  let waves = dag.waves()?;
  let output_dir = options.output_dir.clone().unwrap_or_else(|| ctx.output_dir());

  info!(
    steps = dag.len(),
    wave_count = waves.len(),
    output = %output_dir.display(),
    "starting packaging"
  );

  let mut result = PackageResult::default();
  let mut blocked: HashSet<StepId> = HashSet::new();
  let semaphore = Arc::new(Semaphore::new(options.parallelism.max(1)));

  for (wave_idx, wave) in waves.iter().enumerate() {
    debug!(wave = wave_idx, steps = wave.len(), "executing wave");

    let mut ready = Vec::new();
    for step in wave {
      let failed_dep = dag.dependencies(step).into_iter().find(|dep| blocked.contains(dep));

      if let Some(dep) = failed_dep {
        warn!(step = %step, failed_dep = %dep, "skipping step due to failed dependency");
        blocked.insert(step.clone());
        result.skipped.insert(step.clone(), dep);
      } else {
        ready.push(step.clone());
      }
    }

    if ready.is_empty() {
      continue;
    }

    for (step, outcome) in execute_wave(ready, ctx, &output_dir, semaphore.clone()).await? {
      match outcome {
        Ok(output) => {
          info!(step = %step, "step succeeded");
          result.completed.insert(step, output);
        }
        Err(e) => {
          error!(step = %step, error = %e, "step failed");
          blocked.insert(step.clone());
          result.failed.insert(step, e);
        }
      }
    }
  }

  info!(
    completed = result.completed.len(),
    failed = result.failed.len(),
    skipped = result.skipped.len(),
    "packaging complete"
  );

  Ok(result)
}

/// Execute a wave of steps in parallel.
async fn execute_wave(
  steps: Vec<StepId>,
  ctx: &Arc<BuildContext>,
  output_dir: &Path,
  semaphore: Arc<Semaphore>,
) -> Result<Vec<StepOutcome>, ExecuteError> {
  let mut join_set = JoinSet::new();

  for step in steps {
    let ctx = Arc::clone(ctx);
    let output_dir = output_dir.to_path_buf();
    let semaphore = semaphore.clone();

    join_set.spawn(async move {
      let _permit = semaphore
        .acquire_owned()
        .await
        .map_err(|_| ExecuteError::SchedulerClosed)?;

      let outcome = tokio::task::spawn_blocking(move || {
        let outcome = run_step(&ctx, &step, &output_dir);
        (step, outcome)
      })
      .await?;

      Ok::<_, ExecuteError>(outcome)
    });
  }

  let mut outcomes = Vec::new();
  while let Some(joined) = join_set.join_next().await {
    outcomes.push(joined??);
  }

  Ok(outcomes)
}

/// Run a single step.
fn run_step(ctx: &BuildContext, step: &StepId, output_dir: &Path) -> Result<StepOutput, StepError> {
  if step.kind == StepKind::Dist {
    let path = dist::write_dist(ctx, output_dir)?;
    return archive_output(path);
  }

  let module = ctx
    .module(&step.module)
    .ok_or_else(|| StepError::UnknownModule(step.module.clone()))?;

  if let Some(dir) = module.external_output(step.kind) {
    if !dir.is_dir() {
      return Err(StepError::MissingOutput {
        step: step.clone(),
        path: dir.to_path_buf(),
      });
    }
    debug!(step = %step, path = %dir.display(), "external output present");
    return Ok(StepOutput::default());
  }

  if step.kind == StepKind::Jar {
    let primary = module
      .publishable
      .primary()
      .ok_or_else(|| StepError::UndeclaredArtifact(step.clone()))?;
    let dest = output_path(output_dir, &primary.file_name)?;

    let mut builder = ArchiveBuilder::jar(&ctx.manifest_attributes(module));
    builder.add_dir(&module.classes, "")?;
    builder.write(&dest)?;
    return archive_output(dest);
  }

  let artifact = ctx
    .artifacts()
    .iter()
    .find(|a| &a.step == step)
    .ok_or_else(|| StepError::UndeclaredArtifact(step.clone()))?;
  let dest = output_path(output_dir, &artifact.file_name)?;

  let mut builder = ArchiveBuilder::new();
  for root in &artifact.content_root {
    if root.is_dir() {
      builder.add_dir(root, "")?;
    } else {
      debug!(step = %step, path = %root.display(), "skipping missing content root");
    }
  }
  builder.write(&dest)?;
  archive_output(dest)
}

fn archive_output(path: PathBuf) -> Result<StepOutput, StepError> {
  let sha256 = hash_file(&path)?;
  Ok(StepOutput {
    archive: Some(path),
    sha256: Some(sha256),
  })
}
