//! Continuous integration detection.
//!
//! A build counts as a CI build when the detect variable is present in the
//! process environment, whatever its value. The build number is only read for
//! CI builds; a missing build number is not an error.

use std::ffi::OsString;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{DEFAULT_BUILD_NUMBER_VAR, DEFAULT_CI_VAR};

/// Names of the environment variables consulted by the probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CiVariables {
  /// Presence of this variable marks a CI build.
  pub detect: String,
  /// Variable holding the CI-assigned build number.
  pub build_number: String,
}

impl Default for CiVariables {
  fn default() -> Self {
    Self {
      detect: DEFAULT_CI_VAR.to_string(),
      build_number: DEFAULT_BUILD_NUMBER_VAR.to_string(),
    }
  }
}

/// Whether the build runs under CI, and the build number it was assigned.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildEnvironment {
  pub is_ci: bool,
  /// Empty when not running under CI or when CI did not provide one.
  pub build_number: String,
}

impl BuildEnvironment {
  /// A local (non-CI) build.
  pub fn local() -> Self {
    Self::default()
  }

  /// A CI build with the given build number.
  pub fn ci(build_number: impl Into<String>) -> Self {
    Self {
      is_ci: true,
      build_number: build_number.into(),
    }
  }

  /// Probe the process environment.
  pub fn detect(vars: &CiVariables) -> Self {
    Self::detect_with(vars, |name| std::env::var_os(name))
  }

  /// Probe using an explicit variable lookup.
  pub fn detect_with<F>(vars: &CiVariables, lookup: F) -> Self
  where
    F: Fn(&str) -> Option<OsString>,
  {
    if lookup(&vars.detect).is_none() {
      debug!(var = %vars.detect, "CI variable not set, building locally");
      return Self::local();
    }

    let build_number = lookup(&vars.build_number)
      .map(|v| v.to_string_lossy().into_owned())
      .unwrap_or_default();

    debug!(var = %vars.detect, build_number = %build_number, "CI variable set");
    Self::ci(build_number)
  }
}
