use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::policy::FailurePolicy;

/// Contents of `taskdeck.toml`. Every section is optional.
#[derive(Debug, Deserialize, Default)]
pub struct TaskdeckConfig {
    #[serde(default)]
    pub runner: RunnerConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct RunnerConfig {
    #[serde(default)]
    pub on_failure: FailurePolicy,
}

impl TaskdeckConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str::<Self>(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`load_from_file`](Self::load_from_file), but a missing file yields defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("{} not present, using default config", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_ignores_failures() {
        let cfg: TaskdeckConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(cfg.runner.on_failure, FailurePolicy::Ignore);
    }

    #[test]
    fn parses_abort_policy() {
        let cfg: TaskdeckConfig = toml::from_str(
            r#"
            [runner]
            on_failure = "abort"
            "#,
        )
        .expect("fixture config should parse");
        assert_eq!(cfg.runner.on_failure, FailurePolicy::Abort);
    }

    #[test]
    fn rejects_unknown_policy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taskdeck.toml");
        std::fs::write(&path, "[runner]\non_failure = \"retry\"\n").unwrap();

        let err = TaskdeckConfig::load_from_file(&path).expect_err("must fail");
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = TaskdeckConfig::load_or_default(&dir.path().join("taskdeck.toml")).unwrap();
        assert_eq!(cfg.runner.on_failure, FailurePolicy::Ignore);
    }
}
