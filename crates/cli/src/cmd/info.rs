//! Implementation of the `stamp info` command.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use stamp_lib::metadata::{BuildMetadata, ManifestAttributes, MetadataCell};

use super::load_project;
use crate::output::{OutputFormat, print_field, print_json, print_section, print_title};

#[derive(Serialize)]
struct InfoOutput<'a> {
  project: &'a str,
  metadata: &'a BuildMetadata,
  manifest: Vec<ManifestModule>,
}

#[derive(Serialize)]
struct ManifestModule {
  module: String,
  attributes: ManifestAttributes,
}

pub fn cmd_info(dir: &Path, cell: &MetadataCell, output: OutputFormat) -> Result<()> {
  let ctx = load_project(dir, cell)?;
  let metadata = ctx.metadata();

  let manifest: Vec<ManifestModule> = ctx
    .modules()
    .iter()
    .filter(|m| m.has_compile_step())
    .map(|m| ManifestModule {
      module: m.name.clone(),
      attributes: ctx.manifest_attributes(m),
    })
    .collect();

  if output.is_json() {
    return print_json(&InfoOutput {
      project: ctx.project_name(),
      metadata,
      manifest,
    });
  }

  print_title(&format!("{} {}", ctx.project_name(), metadata.version()));
  print_section("Build");
  print_field("Base version", metadata.base_version());
  print_field("CI", if metadata.is_ci() { "yes" } else { "no" });
  if metadata.is_ci() {
    print_field("Build number", metadata.build_number());
  }
  print_field("Commit", metadata.commit_id());
  print_field("Abbreviated", metadata.abbreviated_commit_id());

  for module in &manifest {
    print_section(&format!("Manifest of {}", module.module));
    for (name, value) in module.attributes.iter() {
      print_field(name, value);
    }
  }

  Ok(())
}
