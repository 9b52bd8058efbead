use std::path::PathBuf;

use thiserror::Error;

use crate::command::TaskName;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown task '{0}'")]
    UnknownTask(String),

    #[error("task '{task}' depends on '{dependency}', which is not registered")]
    UnknownDependency { task: TaskName, dependency: TaskName },

    #[error("task '{0}' is already registered")]
    DuplicateTask(TaskName),

    #[error("task '{0}' cannot depend on itself")]
    Cycle(TaskName),

    #[error("task '{task}' requires argument '{argument}'")]
    MissingArgument {
        task: TaskName,
        argument: &'static str,
    },

    #[error("task '{task}' aborted at '{invocation}': {reason}")]
    StepFailed {
        task: TaskName,
        invocation: String,
        reason: String,
    },

    #[error("failed to read config file: {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config: {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to resolve project root from {}", path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
