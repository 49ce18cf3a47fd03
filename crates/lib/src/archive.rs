//! Deterministic zip and jar writing.
//!
//! Archives written here depend only on the names and contents of their
//! entries: entries are sorted, every parent directory gets its own entry
//! ahead of its contents, and all timestamps are the zip epoch
//! (1980-01-01 00:00:00).

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::consts::MANIFEST_PATH;
use crate::metadata::ManifestAttributes;

#[derive(Debug, Error)]
pub enum ArchiveError {
  #[error("content directory does not exist: {}", .0.display())]
  MissingContent(PathBuf),

  #[error("failed to walk {}: {source}", path.display())]
  Walk {
    path: PathBuf,
    #[source]
    source: walkdir::Error,
  },

  #[error("i/o error on {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("archive name '{0}' is not a plain file name")]
  UnsafeName(String),

  #[error("failed to write archive {}: {source}", path.display())]
  Zip {
    path: PathBuf,
    #[source]
    source: zip::result::ZipError,
  },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum EntrySource {
  Directory,
  File(PathBuf),
  Bytes(Vec<u8>),
}

/// Collects entries and writes them as one archive.
#[derive(Debug, Default)]
pub struct ArchiveBuilder {
  /// Entries written before everything else, in insertion order.
  leading: Vec<(String, EntrySource)>,
  entries: BTreeMap<String, EntrySource>,
}

impl ArchiveBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Start a jar whose first entries are `META-INF/` and the manifest.
  pub fn jar(manifest: &ManifestAttributes) -> Self {
    let mut builder = Self::new();
    builder.leading.push(("META-INF/".to_string(), EntrySource::Directory));
    builder.leading.push((
      MANIFEST_PATH.to_string(),
      EntrySource::Bytes(manifest.render().into_bytes()),
    ));
    builder
  }

  /// Add every file below `dir`, named relative to `dir` and prefixed with `prefix`.
  ///
  /// `prefix` is either empty or ends with `/`.
  pub fn add_dir(&mut self, dir: &Path, prefix: &str) -> Result<&mut Self, ArchiveError> {
    if !dir.is_dir() {
      return Err(ArchiveError::MissingContent(dir.to_path_buf()));
    }

    for entry in WalkDir::new(dir).sort_by_file_name() {
      let entry = entry.map_err(|source| ArchiveError::Walk {
        path: dir.to_path_buf(),
        source,
      })?;
      if !entry.file_type().is_file() {
        continue;
      }

      let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
      let name = format!("{}{}", prefix, entry_name(relative));
      self.add_file(&name, entry.path());
    }

    Ok(self)
  }

  /// Add a single file under `name`.
  pub fn add_file(&mut self, name: &str, path: &Path) -> &mut Self {
    self.insert(name, EntrySource::File(path.to_path_buf()));
    self
  }

  /// Add in-memory content under `name`.
  pub fn add_bytes(&mut self, name: &str, content: impl Into<Vec<u8>>) -> &mut Self {
    self.insert(name, EntrySource::Bytes(content.into()));
    self
  }

  /// Entry names in the order they will be written.
  pub fn entry_names(&self) -> Vec<String> {
    self
      .leading
      .iter()
      .map(|(name, _)| name.clone())
      .chain(self.sorted_entries().into_keys())
      .collect()
  }

  /// Write the archive to `dest`, replacing any existing file atomically.
  pub fn write(&self, dest: &Path) -> Result<(), ArchiveError> {
    let parent = dest.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(parent).map_err(|source| ArchiveError::Io {
      path: parent.to_path_buf(),
      source,
    })?;

    let temp = tempfile::NamedTempFile::new_in(parent).map_err(|source| ArchiveError::Io {
      path: parent.to_path_buf(),
      source,
    })?;

    let zip_err = |source| ArchiveError::Zip {
      path: dest.to_path_buf(),
      source,
    };

    let mut zip = ZipWriter::new(temp.as_file());
    let sorted = self.sorted_entries();
    let all = self.leading.iter().map(|(n, s)| (n, s)).chain(sorted.iter().map(|(n, s)| (n, *s)));

    for (name, source) in all {
      match source {
        EntrySource::Directory => {
          zip.add_directory(name.as_str(), directory_options()).map_err(zip_err)?;
        }
        EntrySource::Bytes(bytes) => {
          zip.start_file(name.as_str(), file_options()).map_err(zip_err)?;
          zip.write_all(bytes).map_err(|source| ArchiveError::Io {
            path: dest.to_path_buf(),
            source,
          })?;
        }
        EntrySource::File(path) => {
          zip.start_file(name.as_str(), file_options()).map_err(zip_err)?;
          let mut file = fs::File::open(path).map_err(|source| ArchiveError::Io {
            path: path.clone(),
            source,
          })?;
          io::copy(&mut file, &mut zip).map_err(|source| ArchiveError::Io {
            path: path.clone(),
            source,
          })?;
        }
      }
    }

    zip.finish().map_err(zip_err)?;

    temp.persist(dest).map_err(|e| ArchiveError::Io {
      path: dest.to_path_buf(),
      source: e.error,
    })?;

    debug!(path = %dest.display(), entries = self.leading.len() + sorted.len(), "wrote archive");
    Ok(())
  }

  fn insert(&mut self, name: &str, source: EntrySource) {
    // leading entries (the manifest) win over content with the same name
    if self.leading.iter().any(|(n, _)| n == name) {
      return;
    }
    self.entries.insert(name.to_string(), source);
  }

  /// Content entries plus a directory entry for every parent, sorted by name.
  fn sorted_entries(&self) -> BTreeMap<String, &EntrySource> {
    const DIRECTORY: &EntrySource = &EntrySource::Directory;

    let mut sorted: BTreeMap<String, &EntrySource> = BTreeMap::new();
    for (name, source) in &self.entries {
      let mut end = 0;
      while let Some(pos) = name[end..].find('/') {
        end += pos + 1;
        let dir = &name[..end];
        if !self.leading.iter().any(|(n, _)| n == dir) {
          sorted.entry(dir.to_string()).or_insert(DIRECTORY);
        }
      }
      sorted.insert(name.clone(), source);
    }
    sorted
  }
}

/// Path of the archive `file_name` directly inside `dir`.
///
/// `file_name` must be a single normal path component, so the archive can
/// never land outside `dir`.
pub fn output_path(dir: &Path, file_name: &str) -> Result<PathBuf, ArchiveError> {
  let mut components = Path::new(file_name).components();
  match (components.next(), components.next()) {
    (Some(Component::Normal(_)), None) => Ok(dir.join(file_name)),
    _ => Err(ArchiveError::UnsafeName(file_name.to_string())),
  }
}

fn entry_name(relative: &Path) -> String {
  relative
    .components()
    .map(|c| c.as_os_str().to_string_lossy())
    .collect::<Vec<_>>()
    .join("/")
}

fn file_options() -> SimpleFileOptions {
  SimpleFileOptions::default()
    .compression_method(CompressionMethod::Deflated)
    .last_modified_time(DateTime::default())
    .unix_permissions(0o644)
}

fn directory_options() -> SimpleFileOptions {
  SimpleFileOptions::default()
    .compression_method(CompressionMethod::Stored)
    .last_modified_time(DateTime::default())
    .unix_permissions(0o755)
}
