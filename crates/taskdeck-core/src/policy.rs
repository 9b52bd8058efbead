use serde::Deserialize;

/// What the executor does when a delegated command exits non-zero or cannot
/// be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log the failure and continue with the next step.
    Ignore,
    /// Stop at the first failed step and return an error.
    Abort,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        Self::Ignore
    }
}
