use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ci::CiVariables;
use crate::consts::DEFAULT_OUTPUT_DIR;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
  pub project: ProjectSection,
  #[serde(default)]
  pub ci: CiVariables,
  #[serde(default)]
  pub output: OutputSection,
  #[serde(default)]
  pub modules: Vec<ModuleSection>,
  #[serde(default)]
  pub dist: DistSection,
}

impl ProjectConfig {
  /// Declared modules, or the single conventional module named after the project.
  pub fn effective_modules(&self) -> Vec<ModuleSection> {
    if self.modules.is_empty() {
      vec![ModuleSection::conventional(&self.project.name)]
    } else {
      self.modules.clone()
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectSection {
  pub name: String,
  /// Base version; the build suffix is appended to it.
  pub version: String,
  pub description: Option<String>,
  pub group: Option<String>,
  /// Written as `Automatic-Module-Name` into primary archives.
  pub module_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
  /// Archive output directory, relative to the project root.
  pub dir: PathBuf,
}

impl Default for OutputSection {
  fn default() -> Self {
    Self {
      dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
    }
  }
}

/// One packaged module. Paths are relative to `dir`, which is relative to the
/// project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleSection {
  pub name: String,
  #[serde(default = "default_module_dir")]
  pub dir: PathBuf,
  /// Whether the module has a primary compile step.
  #[serde(default = "default_true")]
  pub compile: bool,
  #[serde(default = "default_sources")]
  pub sources: Vec<PathBuf>,
  #[serde(default = "default_classes")]
  pub classes: PathBuf,
  #[serde(default = "default_docs")]
  pub docs: PathBuf,
  #[serde(default = "default_test_classes")]
  pub test_classes: PathBuf,
}

impl ModuleSection {
  pub fn conventional(name: &str) -> Self {
    Self {
      name: name.to_string(),
      dir: default_module_dir(),
      compile: true,
      sources: default_sources(),
      classes: default_classes(),
      docs: default_docs(),
      test_classes: default_test_classes(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DistSection {
  pub enabled: bool,
  /// Files copied into the bundle. When unset, `README.md`, `LICENSE` and
  /// `NOTICE` are included if they exist.
  pub include: Option<Vec<PathBuf>>,
}

impl Default for DistSection {
  fn default() -> Self {
    Self {
      enabled: true,
      include: None,
    }
  }
}

fn default_true() -> bool {
  true
}

fn default_module_dir() -> PathBuf {
  PathBuf::from(".")
}

fn default_sources() -> Vec<PathBuf> {
  vec![PathBuf::from("src/main/java")]
}

fn default_classes() -> PathBuf {
  PathBuf::from("build/classes/java/main")
}

fn default_docs() -> PathBuf {
  PathBuf::from("build/docs/javadoc")
}

fn default_test_classes() -> PathBuf {
  PathBuf::from("build/classes/java/test")
}
