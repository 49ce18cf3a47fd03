//! CLI integration tests.

mod common;
mod info_tests;
mod init_tests;
mod package_tests;
mod plan_tests;
mod version_tests;
