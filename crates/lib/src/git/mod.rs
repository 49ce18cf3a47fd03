//! Commit identity of the enclosing git repository.
//!
//! The repository is discovered upward from a starting directory the same way
//! git does it (honouring `GIT_DIR` and `GIT_CEILING_DIRECTORIES`). The handle
//! only lives for the duration of [`with_repository`], so no file in the git
//! directory stays open once the identity has been read.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while resolving the commit identity.
#[derive(Debug, Error)]
pub enum GitError {
  /// No repository at or above the starting directory.
  #[error("no git repository found at or above '{}': {source}", start.display())]
  RepositoryNotFound {
    start: PathBuf,
    #[source]
    source: Box<gix::discover::Error>,
  },

  /// HEAD does not point to a commit, e.g. in a repository without commits.
  #[error("failed to resolve HEAD in '{}': {source}", git_dir.display())]
  UnresolvableHead {
    git_dir: PathBuf,
    #[source]
    source: Box<gix::reference::head_id::Error>,
  },
}

/// The checked-out commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitIdentity {
  /// Full hexadecimal object id.
  pub full_id: String,
  /// Shortest unambiguous prefix of `full_id` as abbreviated by the repository.
  pub abbreviated_id: String,
}

impl CommitIdentity {
  /// Whether `abbreviated_id` is a non-empty prefix of `full_id`.
  pub fn is_consistent(&self) -> bool {
    !self.abbreviated_id.is_empty() && self.full_id.starts_with(&self.abbreviated_id)
  }
}

/// Resolve the commit checked out in the repository enclosing `start_dir`.
///
/// # Errors
///
/// - [`GitError::RepositoryNotFound`] when no repository is discoverable
/// - [`GitError::UnresolvableHead`] when HEAD has no commit to point to
pub fn resolve(start_dir: &Path) -> Result<CommitIdentity, GitError> {
  let identity = with_repository(start_dir, read_head)?;
  debug!(
    commit = %identity.full_id,
    abbreviated = %identity.abbreviated_id,
    "resolved HEAD"
  );
  Ok(identity)
}

/// Open the repository enclosing `start_dir`, run `f` against it, then release it.
///
/// The repository is dropped before returning, whether `f` succeeded or not.
pub fn with_repository<T, F>(start_dir: &Path, f: F) -> Result<T, GitError>
where
  F: FnOnce(&gix::Repository) -> Result<T, GitError>,
{
  let repo = gix::ThreadSafeRepository::discover_with_environment_overrides(start_dir)
    .map_err(|e| GitError::RepositoryNotFound {
      start: start_dir.to_path_buf(),
      source: Box::new(e),
    })?
    .to_thread_local();

  debug!(git_dir = %repo.git_dir().display(), "opened repository");
  let result = f(&repo);
  drop(repo);
  debug!("released repository");

  result
}

fn read_head(repo: &gix::Repository) -> Result<CommitIdentity, GitError> {
  let head = repo.head_id().map_err(|e| GitError::UnresolvableHead {
    git_dir: repo.git_dir().to_path_buf(),
    source: Box::new(e),
  })?;

  Ok(CommitIdentity {
    full_id: head.detach().to_string(),
    abbreviated_id: head.shorten_or_id().to_string(),
  })
}
