//! Scaffold a new project descriptor.
//!
//! This module provides the core logic for the `stamp init` command, which
//! writes a commented `stamp.toml` into a project directory.

mod templates;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::consts::PROJECT_FILE;

pub use templates::PROJECT_TEMPLATE;

/// Errors that can occur during initialization.
#[derive(Debug, Error)]
pub enum InitError {
  #[error("file already exists: {}", path.display())]
  PathExists { path: PathBuf },

  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error("failed to write file {}: {source}", path.display())]
  WriteFile { path: PathBuf, source: std::io::Error },
}

/// Options for initializing a project.
#[derive(Debug, Clone)]
pub struct InitOptions {
  /// Project directory, created if missing.
  pub dir: PathBuf,
  /// Project name. Defaults to the directory name.
  pub name: Option<String>,
}

/// Result of a successful initialization.
#[derive(Debug)]
pub struct InitResult {
  /// Path to the created `stamp.toml`
  pub project_file: PathBuf,
  /// Project name written into the descriptor
  pub name: String,
}

/// Write a template `stamp.toml` into `options.dir`.
///
/// # Errors
///
/// Returns an error if:
/// - `stamp.toml` already exists
/// - Directory creation fails
/// - File writing fails
pub fn init(options: &InitOptions) -> Result<InitResult, InitError> {
  let dir = &options.dir;

  fs::create_dir_all(dir).map_err(|e| InitError::CreateDir {
    path: dir.clone(),
    source: e,
  })?;

  let project_file = dir.join(PROJECT_FILE);
  if project_file.exists() {
    return Err(InitError::PathExists { path: project_file });
  }

  let name = match &options.name {
    Some(name) => name.clone(),
    None => default_name(dir),
  };

  fs::write(&project_file, PROJECT_TEMPLATE.replace("{name}", &name)).map_err(|e| InitError::WriteFile {
    path: project_file.clone(),
    source: e,
  })?;

  info!(path = %project_file.display(), name = %name, "created project descriptor");
  Ok(InitResult { project_file, name })
}

fn default_name(dir: &Path) -> String {
  dunce::canonicalize(dir)
    .ok()
    .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
    .filter(|n| !n.is_empty())
    .unwrap_or_else(|| "project".to_string())
}
