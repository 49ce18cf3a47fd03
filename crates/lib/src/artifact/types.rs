use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::project::ModuleSection;

/// Classifier of a secondary packaging artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classifier {
  Sources,
  Javadoc,
  Tests,
}

impl Classifier {
  /// Declaration order.
  pub const ALL: [Classifier; 3] = [Classifier::Sources, Classifier::Javadoc, Classifier::Tests];

  pub fn as_str(self) -> &'static str {
    match self {
      Classifier::Sources => "sources",
      Classifier::Javadoc => "javadoc",
      Classifier::Tests => "tests",
    }
  }

  /// The packaging step producing the archive.
  pub fn step_kind(self) -> StepKind {
    match self {
      Classifier::Sources => StepKind::SourcesJar,
      Classifier::Javadoc => StepKind::JavadocJar,
      Classifier::Tests => StepKind::TestsJar,
    }
  }

  /// The step that has to run before the archive can be assembled.
  pub fn depends_on(self) -> StepKind {
    match self {
      Classifier::Sources => StepKind::Classes,
      Classifier::Javadoc => StepKind::Javadoc,
      Classifier::Tests => StepKind::TestClasses,
    }
  }
}

impl std::fmt::Display for Classifier {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Kind of a build step.
///
/// `Classes`, `Javadoc` and `TestClasses` are produced by external tools; the
/// remaining kinds are archives written by stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepKind {
  Classes,
  Javadoc,
  TestClasses,
  Jar,
  SourcesJar,
  JavadocJar,
  TestsJar,
  Dist,
}

impl StepKind {
  pub fn as_str(self) -> &'static str {
    match self {
      StepKind::Classes => "classes",
      StepKind::Javadoc => "javadoc",
      StepKind::TestClasses => "testClasses",
      StepKind::Jar => "jar",
      StepKind::SourcesJar => "sourcesJar",
      StepKind::JavadocJar => "javadocJar",
      StepKind::TestsJar => "testsJar",
      StepKind::Dist => "dist",
    }
  }

  pub fn is_external(self) -> bool {
    matches!(self, StepKind::Classes | StepKind::Javadoc | StepKind::TestClasses)
  }
}

impl std::fmt::Display for StepKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A step of a module, displayed as `module:kind`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StepId {
  pub module: String,
  pub kind: StepKind,
}

impl StepId {
  pub fn new(module: &str, kind: StepKind) -> Self {
    Self {
      module: module.to_string(),
      kind,
    }
  }
}

impl std::fmt::Display for StepId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}:{}", self.module, self.kind)
  }
}

/// A secondary archive declared for a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackagingArtifact {
  pub classifier: Classifier,
  /// The packaging step writing the archive.
  pub step: StepId,
  /// The step whose output the archive is assembled from.
  pub depends_on: StepId,
  /// Directories archived, in order.
  pub content_root: Vec<PathBuf>,
  pub file_name: String,
}

/// An archive exposed to publishers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishableOutput {
  /// `None` for the primary archive.
  pub classifier: Option<Classifier>,
  pub step: StepId,
  pub file_name: String,
}

/// Ordered publishable outputs of a module: primary, sources, javadoc, tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublishableOutputs(Vec<PublishableOutput>);

impl PublishableOutputs {
  /// Register an output. Registering the same step again is ignored.
  pub fn register(&mut self, output: PublishableOutput) {
    if self.0.iter().all(|existing| existing.step != output.step) {
      self.0.push(output);
    }
  }

  pub fn primary(&self) -> Option<&PublishableOutput> {
    self.0.iter().find(|o| o.classifier.is_none())
  }

  pub fn get(&self, classifier: Classifier) -> Option<&PublishableOutput> {
    self.0.iter().find(|o| o.classifier == Some(classifier))
  }

  pub fn iter(&self) -> std::slice::Iter<'_, PublishableOutput> {
    self.0.iter()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl<'a> IntoIterator for &'a PublishableOutputs {
  type Item = &'a PublishableOutput;
  type IntoIter = std::slice::Iter<'a, PublishableOutput>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.iter()
  }
}

/// A module of the project with its directories resolved to absolute paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
  pub name: String,
  pub root: PathBuf,
  pub compile: bool,
  pub sources: Vec<PathBuf>,
  pub classes: PathBuf,
  pub docs: PathBuf,
  pub test_classes: PathBuf,
  pub publishable: PublishableOutputs,
}

impl Module {
  pub fn from_section(project_root: &Path, section: &ModuleSection) -> Self {
    let root = if section.dir == Path::new(".") {
      project_root.to_path_buf()
    } else {
      project_root.join(&section.dir)
    };

    Self {
      name: section.name.clone(),
      compile: section.compile,
      sources: section.sources.iter().map(|s| root.join(s)).collect(),
      classes: root.join(&section.classes),
      docs: root.join(&section.docs),
      test_classes: root.join(&section.test_classes),
      publishable: PublishableOutputs::default(),
      root,
    }
  }

  /// Whether the module has a primary compile step.
  pub fn has_compile_step(&self) -> bool {
    self.compile
  }

  pub fn step(&self, kind: StepKind) -> StepId {
    StepId::new(&self.name, kind)
  }

  /// Output directory of an external step.
  pub fn external_output(&self, kind: StepKind) -> Option<&Path> {
    match kind {
      StepKind::Classes => Some(&self.classes),
      StepKind::Javadoc => Some(&self.docs),
      StepKind::TestClasses => Some(&self.test_classes),
      _ => None,
    }
  }
}
