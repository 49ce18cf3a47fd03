//! Template content for `stamp init`.

/// Template for `stamp.toml`.
/// Contains a `{name}` placeholder for the project name.
pub const PROJECT_TEMPLATE: &str = r#"# Versioning and packaging settings for stamp.

[project]
name = "{name}"
# Base version. Local builds append -SNAPSHOT, CI builds append
# -<build number>.<abbreviated commit>.
version = "0.1.0"
# module_name = "org.example.{name}"

# [ci]
# detect = "CI"
# build_number = "CIRCLE_BUILD_NUM"

# [output]
# dir = "build/libs"

# Without [[modules]] the project root is a single module named after the
# project, using the conventional directory layout.
# [[modules]]
# name = "core"
# dir = "core"
# sources = ["src/main/java"]
# classes = "build/classes/java/main"
# docs = "build/docs/javadoc"
# test_classes = "build/classes/java/test"

# [dist]
# enabled = true
# include = ["README.md", "LICENSE", "NOTICE"]
"#;
