//! Project descriptor (`stamp.toml`).
//!
//! ```toml
//! [project]
//! name = "engine"
//! version = "2.0.0"
//! module_name = "org.example.engine"
//!
//! [ci]
//! detect = "CI"
//! build_number = "CIRCLE_BUILD_NUM"
//!
//! [[modules]]
//! name = "engine"
//! sources = ["src/main/java"]
//! ```
//!
//! Every section except `[project]` is optional. Without `[[modules]]` the
//! project is a single module named after the project, using the conventional
//! directory layout.

mod types;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::consts::PROJECT_FILE;

pub use types::{DistSection, ModuleSection, OutputSection, ProjectConfig, ProjectSection};

#[derive(Debug, Error)]
pub enum ProjectError {
  #[error("no stamp.toml found in '{}'", dir.display())]
  NotFound { dir: PathBuf },

  #[error("failed to read {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: Box<toml::de::Error>,
  },

  #[error("project name must not be empty")]
  EmptyName,

  #[error("invalid project version '{version}': {source}")]
  InvalidVersion {
    version: String,
    #[source]
    source: semver::Error,
  },

  #[error("module name must not be empty")]
  EmptyModuleName,

  #[error("module '{0}' is declared more than once")]
  DuplicateModule(String),
}

impl ProjectConfig {
  /// Load and validate `<root>/stamp.toml`.
  pub fn load(root: &Path) -> Result<Self, ProjectError> {
    let path = root.join(PROJECT_FILE);
    if !path.is_file() {
      return Err(ProjectError::NotFound { dir: root.to_path_buf() });
    }

    let content = fs::read_to_string(&path).map_err(|source| ProjectError::Read {
      path: path.clone(),
      source,
    })?;

    let config: ProjectConfig = toml::from_str(&content).map_err(|e| ProjectError::Parse {
      path: path.clone(),
      source: Box::new(e),
    })?;
    config.validate()?;

    debug!(path = %path.display(), project = %config.project.name, "loaded project descriptor");
    Ok(config)
  }

  /// Check the invariants serde cannot express.
  pub fn validate(&self) -> Result<(), ProjectError> {
    if self.project.name.trim().is_empty() {
      return Err(ProjectError::EmptyName);
    }

    semver::Version::parse(&self.project.version).map_err(|source| ProjectError::InvalidVersion {
      version: self.project.version.clone(),
      source,
    })?;

    let mut seen = HashSet::new();
    for module in &self.modules {
      if module.name.trim().is_empty() {
        return Err(ProjectError::EmptyModuleName);
      }
      if !seen.insert(module.name.as_str()) {
        return Err(ProjectError::DuplicateModule(module.name.clone()));
      }
    }

    Ok(())
  }
}
