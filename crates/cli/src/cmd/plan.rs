//! Implementation of the `stamp plan` command.
//!
//! Prints the packaging steps grouped into execution waves, followed by the
//! publishable outputs of every module. Nothing is written.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use stamp_lib::artifact::{PublishableOutputs, StepId};
use stamp_lib::execute::StepGraph;
use stamp_lib::metadata::MetadataCell;

use super::load_project;
use crate::output::{OutputFormat, StepStatus, print_field, print_json, print_section, print_step, print_title};

#[derive(Serialize)]
struct PlanOutput<'a> {
  version: &'a str,
  waves: Vec<Vec<StepId>>,
  modules: Vec<ModuleOutputs<'a>>,
}

#[derive(Serialize)]
struct ModuleOutputs<'a> {
  name: &'a str,
  outputs: &'a PublishableOutputs,
}

pub fn cmd_plan(dir: &Path, cell: &MetadataCell, output: OutputFormat) -> Result<()> {
  let ctx = load_project(dir, cell)?;

  let dag = StepGraph::from_context(&ctx).context("Failed to build step graph")?;
  let waves = dag.waves().context("Failed to order steps")?;

  let modules: Vec<ModuleOutputs> = ctx
    .modules()
    .iter()
    .map(|m| ModuleOutputs {
      name: &m.name,
      outputs: &m.publishable,
    })
    .collect();

  if output.is_json() {
    return print_json(&PlanOutput {
      version: ctx.metadata().version().as_str(),
      waves,
      modules,
    });
  }

  print_title(&format!("Plan: {} {}", ctx.project_name(), ctx.metadata().version()));
  print_field("Steps", dag.len());
  for (idx, wave) in waves.iter().enumerate() {
    print_section(&format!("Wave {}", idx + 1));
    for step in wave {
      let deps: Vec<String> = dag.dependencies(step).iter().map(ToString::to_string).collect();
      let detail = if deps.is_empty() {
        String::new()
      } else {
        format!("→ {}", deps.join(", "))
      };
      print_step(StepStatus::Planned, step, &detail);
    }
  }

  let out_dir = ctx.output_dir();
  for module in &modules {
    if module.outputs.is_empty() {
      continue;
    }
    print_section(&format!("Outputs of {}", module.name));
    for entry in module.outputs {
      let label = entry.classifier.map(|c| c.as_str()).unwrap_or("primary");
      print_field(label, out_dir.join(&entry.file_name).display());
    }
  }

  Ok(())
}
