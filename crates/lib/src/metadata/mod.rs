//! Build metadata shared by every consumer of a configured build.
//!
//! [`BuildMetadata`] is composed once from the base version, the build
//! environment and the commit identity. [`MetadataCell`] holds it for the rest
//! of the process: the first `initialize` stores it, later calls hand back the
//! stored instance without recomputing anything.

mod manifest;

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ci::BuildEnvironment;
use crate::git::CommitIdentity;
use crate::version::{ComposedVersion, compose};

pub use manifest::ManifestAttributes;

/// Version and traceability information of the running build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildMetadata {
  version: ComposedVersion,
  base_version: String,
  is_ci: bool,
  build_number: String,
  commit_id: String,
  abbreviated_commit_id: String,
}

impl BuildMetadata {
  /// Compose the metadata for a build.
  pub fn initialize(base: &str, env: &BuildEnvironment, commit: &CommitIdentity) -> Self {
    Self {
      version: compose(base, env, commit),
      base_version: base.to_string(),
      is_ci: env.is_ci,
      build_number: env.build_number.clone(),
      commit_id: commit.full_id.clone(),
      abbreviated_commit_id: commit.abbreviated_id.clone(),
    }
  }

  pub fn version(&self) -> &ComposedVersion {
    &self.version
  }

  pub fn base_version(&self) -> &str {
    &self.base_version
  }

  pub fn is_ci(&self) -> bool {
    self.is_ci
  }

  /// CI build number, empty for local builds.
  pub fn build_number(&self) -> &str {
    &self.build_number
  }

  pub fn commit_id(&self) -> &str {
    &self.commit_id
  }

  pub fn abbreviated_commit_id(&self) -> &str {
    &self.abbreviated_commit_id
  }

  /// Attributes embedded in the manifest of every primary archive.
  pub fn manifest_attributes(&self, title: &str, module_name: Option<&str>) -> ManifestAttributes {
    let mut attributes = ManifestAttributes::new();
    if let Some(name) = module_name {
      attributes.insert("Automatic-Module-Name", name);
    }
    attributes.insert("Implementation-Title", title);
    attributes.insert("Implementation-Version", self.version.as_str());
    attributes.insert("Build-Number", &self.build_number);
    attributes.insert("Commit-Id", &self.commit_id);
    attributes
  }
}

/// Single-init holder for the build metadata.
///
/// The caller owns the cell and passes it to whatever configures the build.
#[derive(Debug, Default)]
pub struct MetadataCell {
  inner: OnceLock<Arc<BuildMetadata>>,
}

impl MetadataCell {
  pub fn new() -> Self {
    Self::default()
  }

  /// Compose and store the metadata, or return the already stored instance.
  ///
  /// Arguments of calls after the first are ignored.
  pub fn initialize(&self, base: &str, env: &BuildEnvironment, commit: &CommitIdentity) -> Arc<BuildMetadata> {
    let mut composed = false;
    let metadata = self.inner.get_or_init(|| {
      composed = true;
      Arc::new(BuildMetadata::initialize(base, env, commit))
    });

    if !composed {
      debug!(version = %metadata.version(), "build metadata already initialized");
    }

    Arc::clone(metadata)
  }

  pub fn get(&self) -> Option<Arc<BuildMetadata>> {
    self.inner.get().cloned()
  }

  pub fn is_initialized(&self) -> bool {
    self.inner.get().is_some()
  }
}
