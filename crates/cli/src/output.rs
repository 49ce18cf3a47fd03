//! Terminal output of stamp commands.
//!
//! Build steps are printed one per line with a status marker; metadata and
//! archive details are printed as indented `label: value` fields. Colors are
//! only used when the target stream supports them.

use std::fmt::Display;
use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

use stamp_lib::artifact::StepId;

/// Number of hex digits of an archive digest shown in text output.
const HASH_PREFIX_LEN: usize = 12;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

/// How a step line is marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
  Planned,
  Completed,
  Failed,
  Skipped,
}

impl StepStatus {
  fn marker(self) -> &'static str {
    match self {
      StepStatus::Planned => "•",
      StepStatus::Completed => "✓",
      StepStatus::Failed => "✗",
      StepStatus::Skipped => "⚠",
    }
  }

  /// Failed and skipped steps go to stderr, everything else to stdout.
  fn stream(self) -> Stream {
    match self {
      StepStatus::Failed | StepStatus::Skipped => Stream::Stderr,
      StepStatus::Planned | StepStatus::Completed => Stream::Stdout,
    }
  }
}

/// Leading hex digits of an archive digest.
pub fn short_hash(hash: &str) -> &str {
  &hash[..hash.len().min(HASH_PREFIX_LEN)]
}

/// Archive size with a binary unit, e.g. `1.5 KB`.
pub fn format_size(bytes: u64) -> String {
  const UNITS: [&str; 3] = ["KB", "MB", "GB"];

  if bytes < 1024 {
    return format!("{} B", bytes);
  }

  let mut size = bytes as f64 / 1024.0;
  let mut unit = 0;
  while size >= 1024.0 && unit + 1 < UNITS.len() {
    size /= 1024.0;
    unit += 1;
  }
  format!("{:.1} {}", size, UNITS[unit])
}

/// Format a duration at millisecond precision, e.g. `1s 500ms`.
pub fn format_duration(duration: Duration) -> String {
  let millis = Duration::from_millis(duration.as_millis() as u64);
  humantime::format_duration(millis).to_string()
}

fn step_text(step: &StepId, detail: &str) -> String {
  if detail.is_empty() {
    step.to_string()
  } else {
    format!("{} {}", step, detail)
  }
}

/// Print one step, e.g. `✓ engine:jar build/libs/engine-2.0.0.jar`.
pub fn print_step(status: StepStatus, step: &StepId, detail: &str) {
  let stream = status.stream();
  let marker = status.marker();
  let marker = marker.if_supports_color(stream, |m| match status {
    StepStatus::Planned => m.blue().to_string(),
    StepStatus::Completed => m.green().to_string(),
    StepStatus::Failed => m.red().to_string(),
    StepStatus::Skipped => m.yellow().to_string(),
  });
  let line = format!("    {} {}", marker, step_text(step, detail));

  match stream {
    Stream::Stderr => eprintln!("{}", line),
    _ => println!("{}", line),
  }
}

/// Print the headline of a command's output.
pub fn print_title(text: &str) {
  println!("{}", text.if_supports_color(Stream::Stdout, |t| t.bold()));
}

/// Print the heading of a group of fields or steps.
pub fn print_section(text: &str) {
  println!("  {}:", text.if_supports_color(Stream::Stdout, |t| t.bold()));
}

pub fn print_field(label: &str, value: impl Display) {
  println!(
    "    {}: {}",
    label.if_supports_color(Stream::Stdout, |l| l.dimmed()),
    value
  );
}

/// Print a final success line.
pub fn print_done(text: &str) {
  println!(
    "{} {}",
    StepStatus::Completed.marker().if_supports_color(Stream::Stdout, |m| m.green()),
    text.if_supports_color(Stream::Stdout, |t| t.green())
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}
