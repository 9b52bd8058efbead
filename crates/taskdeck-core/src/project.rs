use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::constants::{CONFIG_FILE, MANIFEST_PYPROJECT};
use crate::error::{Error, Result};

/// The absolute, forward-slash project root every task builds its paths from.
///
/// Resolved once per process and passed explicitly into each task body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot(String);

impl ProjectRoot {
    /// Wraps `path` as-is after slash normalization. Touches no filesystem.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self(normalize(path.as_ref()))
    }

    /// Roots the project at the directory containing the task-definition file.
    pub fn from_task_file(file: &Path) -> Result<Self> {
        let canonical = file.canonicalize().map_err(|source| Error::Root {
            path: file.to_path_buf(),
            source,
        })?;
        let dir = canonical.parent().unwrap_or(canonical.as_path());
        Ok(Self::new(dir))
    }

    /// Walks `start` and its ancestors for a directory holding [`CONFIG_FILE`]
    /// or [`MANIFEST_PYPROJECT`]; the nearest one wins.
    ///
    /// Falls back to `start` itself when neither exists anywhere above it.
    pub fn discover(start: &Path) -> Result<Self> {
        let start = start.canonicalize().map_err(|source| Error::Root {
            path: start.to_path_buf(),
            source,
        })?;

        for dir in start.ancestors() {
            if let Some(anchor) = [CONFIG_FILE, MANIFEST_PYPROJECT]
                .into_iter()
                .find(|name| dir.join(name).is_file())
            {
                debug!("found {} in {}", anchor, dir.display());
                return Ok(Self::new(dir));
            }
        }

        warn!(
            "neither {} nor {} found above {}; using it as the project root",
            CONFIG_FILE,
            MANIFEST_PYPROJECT,
            start.display()
        );
        Ok(Self::new(&start))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// `{root}/{relative}` as a string argument.
    pub fn join(&self, relative: &str) -> String {
        if self.0.ends_with('/') {
            format!("{}{}", self.0, relative)
        } else {
            format!("{}/{}", self.0, relative)
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.as_path().join(CONFIG_FILE)
    }
}

impl Display for ProjectRoot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn normalize(path: &Path) -> String {
    let text = path.to_string_lossy().replace('\\', "/");
    // Verbatim prefix from `canonicalize` on Windows.
    match text.strip_prefix("//?/") {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}
