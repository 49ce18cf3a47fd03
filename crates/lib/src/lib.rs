//! stamp-lib: Core types and logic for stamp
//!
//! This crate provides the pieces a build orchestrator needs to version and
//! package a multi-module project:
//! - `ci`: detects whether the build runs under continuous integration
//! - `git`: resolves the checked-out commit of the enclosing repository
//! - `version`: composes the canonical version string
//! - `metadata`: the single-init build metadata handle and manifest attributes
//! - `artifact`: declares the sources, javadoc and tests packaging artifacts
//! - `project`: the `stamp.toml` descriptor
//! - `context`: the configuration pass tying the above together
//! - `execute`: the build-step graph and its executor
//! - `archive` and `dist`: deterministic jar and zip writing

pub mod archive;
pub mod artifact;
pub mod ci;
pub mod consts;
pub mod context;
pub mod dist;
pub mod execute;
pub mod git;
pub mod init;
pub mod metadata;
pub mod project;
pub mod util;
pub mod version;
