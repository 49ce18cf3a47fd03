pub const APP_NAME: &str = "stamp";

/// File name of the project descriptor at the project root.
pub const PROJECT_FILE: &str = "stamp.toml";

/// Suffix appended to the base version for builds outside CI.
pub const SNAPSHOT_SUFFIX: &str = "SNAPSHOT";

/// Variable whose presence marks a CI build.
pub const DEFAULT_CI_VAR: &str = "CI";

/// Variable carrying the CI-assigned build number.
pub const DEFAULT_BUILD_NUMBER_VAR: &str = "CIRCLE_BUILD_NUM";

/// Default output directory for archives, relative to the project root.
pub const DEFAULT_OUTPUT_DIR: &str = "build/libs";

pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";
pub const MANIFEST_VERSION: &str = "1.0";

/// Maximum line length in bytes of a jar manifest, excluding the line break.
pub const MANIFEST_LINE_LEN: usize = 72;

pub const JAR_EXTENSION: &str = "jar";
pub const ZIP_EXTENSION: &str = "zip";

/// Files bundled into the dist archive when `[dist] include` is unset.
pub const DEFAULT_DIST_INCLUDE: [&str; 3] = ["README.md", "LICENSE", "NOTICE"];
