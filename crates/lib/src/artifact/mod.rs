//! Packaging artifact declaration.
//!
//! Every module with a compile step gets a primary archive and three secondary
//! ones:
//! - `sources`: the module's source directories, after `classes`
//! - `javadoc`: the generated API documentation, after `javadoc`
//! - `tests`: the compiled tests, after `testClasses`
//!
//! All four are registered as publishable outputs of the module, primary
//! first.

mod types;

use tracing::debug;

use crate::consts::JAR_EXTENSION;
use crate::metadata::BuildMetadata;

pub use types::{
  Classifier, Module, PackagingArtifact, PublishableOutput, PublishableOutputs, StepId, StepKind,
};

/// Declares packaging artifacts, named after the build version.
pub struct ArtifactAssembler<'a> {
  metadata: &'a BuildMetadata,
}

impl<'a> ArtifactAssembler<'a> {
  pub fn new(metadata: &'a BuildMetadata) -> Self {
    Self { metadata }
  }

  /// Archive file name, e.g. `engine-2.0.0-SNAPSHOT-sources.jar`.
  pub fn file_name(&self, module: &str, classifier: Option<Classifier>) -> String {
    let version = self.metadata.version().file_component();
    match classifier {
      Some(c) => format!("{}-{}-{}.{}", module, version, c, JAR_EXTENSION),
      None => format!("{}-{}.{}", module, version, JAR_EXTENSION),
    }
  }

  /// Declare the secondary artifacts of `module` and register all outputs.
  ///
  /// Modules without a compile step get nothing. Declaring a module twice
  /// yields the same artifacts and does not duplicate its outputs.
  pub fn declare(&self, module: &mut Module) -> Vec<PackagingArtifact> {
    if !module.has_compile_step() {
      debug!(module = %module.name, "no compile step, skipping artifact declaration");
      return Vec::new();
    }

    module.publishable.register(PublishableOutput {
      classifier: None,
      step: module.step(StepKind::Jar),
      file_name: self.file_name(&module.name, None),
    });

    let artifacts: Vec<PackagingArtifact> = Classifier::ALL
      .into_iter()
      .map(|classifier| PackagingArtifact {
        classifier,
        step: module.step(classifier.step_kind()),
        depends_on: module.step(classifier.depends_on()),
        content_root: match classifier {
          Classifier::Sources => module.sources.clone(),
          Classifier::Javadoc => vec![module.docs.clone()],
          Classifier::Tests => vec![module.test_classes.clone()],
        },
        file_name: self.file_name(&module.name, Some(classifier)),
      })
      .collect();

    for artifact in &artifacts {
      module.publishable.register(PublishableOutput {
        classifier: Some(artifact.classifier),
        step: artifact.step.clone(),
        file_name: artifact.file_name.clone(),
      });
    }

    debug!(module = %module.name, artifacts = artifacts.len(), "declared packaging artifacts");
    artifacts
  }
}
