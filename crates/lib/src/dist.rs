//! Project distribution bundle.
//!
//! `<project>-<version>.zip` holds a single `<project>-<version>/` directory
//! with the project's documentation files followed by the primary, sources
//! and javadoc archive of every compiled module.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::archive::{ArchiveBuilder, ArchiveError, output_path};
use crate::artifact::Classifier;
use crate::consts::{DEFAULT_DIST_INCLUDE, ZIP_EXTENSION};
use crate::context::BuildContext;

#[derive(Debug, Error)]
pub enum DistError {
  /// A file listed in `[dist] include` does not exist.
  #[error("dist include not found: {}", .0.display())]
  MissingInclude(PathBuf),

  /// A module archive has not been written.
  #[error("module archive not found: {}", .0.display())]
  MissingArchive(PathBuf),

  #[error(transparent)]
  Archive(#[from] ArchiveError),
}

/// Directory name inside the bundle, `<project>-<version>`.
pub fn bundle_name(ctx: &BuildContext) -> String {
  format!("{}-{}", ctx.project_name(), ctx.metadata().version().file_component())
}

/// File name of the bundle, `<project>-<version>.zip`.
pub fn dist_file_name(ctx: &BuildContext) -> String {
  format!("{}.{}", bundle_name(ctx), ZIP_EXTENSION)
}

/// Write the bundle into `output_dir` and return its path.
///
/// Module archives are read from `output_dir`, so the packaging steps of
/// every module must have run before.
pub fn write_dist(ctx: &BuildContext, output_dir: &Path) -> Result<PathBuf, DistError> {
  let prefix = format!("{}/", bundle_name(ctx));
  let mut builder = ArchiveBuilder::new();

  for file in include_files(ctx)? {
    let Some(name) = file.file_name() else {
      continue;
    };
    builder.add_file(&format!("{}{}", prefix, name.to_string_lossy()), &file);
  }

  for module in ctx.modules().iter().filter(|m| m.has_compile_step()) {
    let outputs = [
      module.publishable.primary(),
      module.publishable.get(Classifier::Sources),
      module.publishable.get(Classifier::Javadoc),
    ];

    for output in outputs.into_iter().flatten() {
      let path = output_path(output_dir, &output.file_name)?;
      if !path.is_file() {
        return Err(DistError::MissingArchive(path));
      }
      builder.add_file(&format!("{}{}", prefix, output.file_name), &path);
    }
  }

  let dest = output_path(output_dir, &dist_file_name(ctx))?;
  builder.write(&dest)?;

  info!(path = %dest.display(), "wrote distribution");
  Ok(dest)
}

/// Resolve the files to bundle. Explicitly listed files must exist; the
/// defaults are skipped when missing.
fn include_files(ctx: &BuildContext) -> Result<Vec<PathBuf>, DistError> {
  match &ctx.config().dist.include {
    Some(listed) => listed
      .iter()
      .map(|rel| {
        let path = ctx.root().join(rel);
        if path.is_file() {
          Ok(path)
        } else {
          Err(DistError::MissingInclude(path))
        }
      })
      .collect(),
    None => Ok(
      DEFAULT_DIST_INCLUDE
        .iter()
        .map(|name| ctx.root().join(name))
        .filter(|path| {
          let found = path.is_file();
          if !found {
            debug!(path = %path.display(), "skipping missing dist file");
          }
          found
        })
        .collect(),
    ),
  }
}
