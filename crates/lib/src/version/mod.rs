//! Version composition.
//!
//! Local builds get `<base>-SNAPSHOT`; CI builds get
//! `<base>-<build number>.<abbreviated commit>`.

use serde::{Deserialize, Serialize};

use crate::ci::BuildEnvironment;
use crate::consts::SNAPSHOT_SUFFIX;
use crate::git::CommitIdentity;

/// The canonical version of a build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComposedVersion(String);

impl ComposedVersion {
  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn is_snapshot(&self) -> bool {
    self
      .0
      .strip_suffix(SNAPSHOT_SUFFIX)
      .is_some_and(|rest| rest.ends_with('-'))
  }

  /// The version as used in file names.
  ///
  /// The build number is free-form, so everything except ASCII letters,
  /// digits and `.-_+` becomes `_`. Regular versions pass through unchanged.
  pub fn file_component(&self) -> String {
    self
      .0
      .chars()
      .map(|c| {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '+') {
          c
        } else {
          '_'
        }
      })
      .collect()
  }
}

impl std::fmt::Display for ComposedVersion {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for ComposedVersion {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

/// Compose the version for `base` in the given environment.
///
/// `base` is used verbatim; validating it is up to the caller.
pub fn compose(base: &str, env: &BuildEnvironment, commit: &CommitIdentity) -> ComposedVersion {
  if env.is_ci {
    ComposedVersion(format!("{}-{}.{}", base, env.build_number, commit.abbreviated_id))
  } else {
    ComposedVersion(format!("{}-{}", base, SNAPSHOT_SUFFIX))
  }
}
