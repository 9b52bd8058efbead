//! Constants used across the taskdeck workspace.

/// The task-definition file. Its directory is the project root.
pub const CONFIG_FILE: &str = "taskdeck.toml";

/// The packaging manifest. Anchors the root when no task-definition file exists.
pub const MANIFEST_PYPROJECT: &str = "pyproject.toml";

/// Robot Framework suites, relative to the project root.
pub const SUITES_DIR: &str = "tests/suites";

/// Output directory for Robot Framework logs and reports.
pub const LOGS_DIR: &str = "tests/logs";

/// The Python package checked by the linter.
pub const PACKAGE_DIR: &str = "src/OpenApiDriver";

/// Log levels handed to the test runner (`run:default`).
pub const TEST_LOG_LEVEL: &str = "TRACE:DEBUG";
