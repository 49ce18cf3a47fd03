//! Build configuration pass.
//!
//! [`configure`] runs once per build: it loads the project descriptor, probes
//! the environment, resolves the commit, initializes the metadata and
//! declares the packaging artifacts. The resulting [`BuildContext`] is the
//! only source of version information for everything that runs afterwards.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::artifact::{ArtifactAssembler, Module, PackagingArtifact};
use crate::ci::BuildEnvironment;
use crate::git::{self, GitError};
use crate::metadata::{BuildMetadata, ManifestAttributes, MetadataCell};
use crate::project::{ProjectConfig, ProjectError};

#[derive(Debug, Error)]
pub enum ConfigureError {
  #[error("failed to resolve project root '{}': {source}", path.display())]
  Root {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to load project: {0}")]
  Project(#[from] ProjectError),

  #[error("failed to resolve commit: {0}")]
  Commit(#[from] GitError),
}

/// Options for [`configure`].
#[derive(Debug, Clone, Default)]
pub struct ConfigureOptions {
  /// Project root containing `stamp.toml`.
  pub root: PathBuf,
  /// Use this environment instead of probing the process environment.
  pub environment: Option<BuildEnvironment>,
}

impl ConfigureOptions {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self {
      root: root.into(),
      environment: None,
    }
  }
}

/// Everything later build phases need, fixed at configuration time.
#[derive(Debug, Clone)]
pub struct BuildContext {
  root: PathBuf,
  config: ProjectConfig,
  metadata: Arc<BuildMetadata>,
  modules: Vec<Module>,
  artifacts: Vec<PackagingArtifact>,
}

impl BuildContext {
  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn config(&self) -> &ProjectConfig {
    &self.config
  }

  pub fn project_name(&self) -> &str {
    &self.config.project.name
  }

  /// Build metadata. Environment and commit details are read through it.
  pub fn metadata(&self) -> &BuildMetadata {
    &self.metadata
  }

  /// Shared handle to the metadata.
  pub fn metadata_handle(&self) -> Arc<BuildMetadata> {
    Arc::clone(&self.metadata)
  }

  pub fn modules(&self) -> &[Module] {
    &self.modules
  }

  pub fn module(&self, name: &str) -> Option<&Module> {
    self.modules.iter().find(|m| m.name == name)
  }

  /// Packaging artifacts of all modules, in module order.
  pub fn artifacts(&self) -> &[PackagingArtifact] {
    &self.artifacts
  }

  /// Absolute archive output directory.
  pub fn output_dir(&self) -> PathBuf {
    self.root.join(&self.config.output.dir)
  }

  /// Manifest attributes of the primary archive of `module`.
  pub fn manifest_attributes(&self, module: &Module) -> ManifestAttributes {
    self
      .metadata
      .manifest_attributes(&module.name, self.config.project.module_name.as_deref())
  }
}

/// Configure the build rooted at `options.root`.
///
/// `cell` holds the metadata for the whole process; when it was initialized
/// before, its instance is reused.
///
/// # Errors
///
/// Fails when the descriptor cannot be loaded or the commit cannot be resolved.
/// Nothing is written to disk either way.
pub fn configure(options: &ConfigureOptions, cell: &MetadataCell) -> Result<BuildContext, ConfigureError> {
  let root = dunce::canonicalize(&options.root).map_err(|source| ConfigureError::Root {
    path: options.root.clone(),
    source,
  })?;

  let config = ProjectConfig::load(&root)?;

  let environment = match &options.environment {
    Some(env) => env.clone(),
    None => BuildEnvironment::detect(&config.ci),
  };
  if environment.is_ci {
    info!("Building on CI.");
  }

  let commit = git::resolve(&root)?;
  let metadata = cell.initialize(&config.project.version, &environment, &commit);
  info!("Building {} {}", config.project.name, metadata.version());

  let assembler = ArtifactAssembler::new(&metadata);
  let mut modules = Vec::new();
  let mut artifacts = Vec::new();
  for section in config.effective_modules() {
    let mut module = Module::from_section(&root, &section);
    artifacts.extend(assembler.declare(&mut module));
    modules.push(module);
  }

  debug!(
    modules = modules.len(),
    artifacts = artifacts.len(),
    "configuration complete"
  );

  Ok(BuildContext {
    root,
    config,
    metadata,
    modules,
    artifacts,
  })
}
