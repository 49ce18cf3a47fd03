mod info;
mod init;
mod package;
mod plan;
mod version;

use std::path::Path;

use anyhow::{Context, Result};

use stamp_lib::context::{BuildContext, ConfigureOptions, configure};
use stamp_lib::metadata::MetadataCell;

pub use info::cmd_info;
pub use init::cmd_init;
pub use package::cmd_package;
pub use plan::cmd_plan;
pub use version::cmd_version;

/// Run the configuration pass for the project in `dir`.
fn load_project(dir: &Path, cell: &MetadataCell) -> Result<BuildContext> {
  configure(&ConfigureOptions::new(dir), cell)
    .with_context(|| format!("Failed to configure project in {}", dir.display()))
}
