//! Implementation of the `stamp init` command.
//!
//! This command writes a commented `stamp.toml` template into a project
//! directory.

use std::path::Path;

use anyhow::{Context, Result};

use stamp_lib::init::{InitOptions, init};

use crate::output::{print_done, print_field, print_section};

/// Execute the init command.
///
/// # Errors
///
/// Returns an error if `stamp.toml` already exists or cannot be written.
pub fn cmd_init(path: &Path, name: Option<String>) -> Result<()> {
  let options = InitOptions {
    dir: path.to_path_buf(),
    name,
  };

  let result = init(&options).context("Failed to initialize project")?;

  print_done(&format!("Initialized {}!", result.name));
  print_field("Descriptor", result.project_file.display());
  println!();
  print_section("Next steps");
  println!("    1. Describe your modules in {}", result.project_file.display());
  println!("    2. Run: stamp plan -C {}", path.display());

  Ok(())
}
