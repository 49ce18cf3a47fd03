mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stamp_lib::metadata::MetadataCell;

use crate::output::OutputFormat;

/// stamp - Build versioning and packaging for multi-module projects
#[derive(Parser)]
#[command(name = "stamp")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Args, Debug)]
struct ProjectArgs {
  /// Project directory containing stamp.toml
  #[arg(short = 'C', long = "dir", default_value = ".")]
  dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
  /// Print the composed build version
  Version {
    #[command(flatten)]
    project: ProjectArgs,
  },

  /// Show build metadata and manifest attributes
  Info {
    #[command(flatten)]
    project: ProjectArgs,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Show packaging steps and publishable outputs
  Plan {
    #[command(flatten)]
    project: ProjectArgs,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Run the packaging steps
  Package {
    #[command(flatten)]
    project: ProjectArgs,

    /// Maximum number of steps to run in parallel
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Write archives here instead of the configured output directory
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Create a stamp.toml template
  Init {
    /// Project directory
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Project name (defaults to the directory name)
    #[arg(long)]
    name: Option<String>,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .init();

  let cell = MetadataCell::new();

  match cli.command {
    Commands::Version { project } => cmd::cmd_version(&project.dir, &cell),
    Commands::Info { project, output } => cmd::cmd_info(&project.dir, &cell, output),
    Commands::Plan { project, output } => cmd::cmd_plan(&project.dir, &cell, output),
    Commands::Package {
      project,
      jobs,
      out_dir,
      output,
    } => cmd::cmd_package(&project.dir, &cell, jobs, out_dir, output),
    Commands::Init { path, name } => cmd::cmd_init(&path, name),
  }
}
