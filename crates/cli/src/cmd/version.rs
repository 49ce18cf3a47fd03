//! Implementation of the `stamp version` command.

use std::path::Path;

use anyhow::Result;

use stamp_lib::metadata::MetadataCell;

use super::load_project;

/// Print the composed version on its own line, for use in scripts.
pub fn cmd_version(dir: &Path, cell: &MetadataCell) -> Result<()> {
  let ctx = load_project(dir, cell)?;
  println!("{}", ctx.metadata().version());
  Ok(())
}
