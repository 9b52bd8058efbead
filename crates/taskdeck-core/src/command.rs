use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::Error;

/// The fixed set of tasks a contributor can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskName {
    Tests,
    Lint,
    FormatCode,
    Build,
    BumpVersion,
}

impl TaskName {
    pub const ALL: [TaskName; 5] = [
        Self::Tests,
        Self::Lint,
        Self::FormatCode,
        Self::Build,
        Self::BumpVersion,
    ];

    /// The name shown on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tests => "tests",
            Self::Lint => "lint",
            Self::FormatCode => "format",
            Self::Build => "build",
            Self::BumpVersion => "bump-version",
        }
    }
}

impl Display for TaskName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskName {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.replace('_', "-").as_str() {
            "tests" => Ok(Self::Tests),
            "lint" => Ok(Self::Lint),
            "format" | "format-code" => Ok(Self::FormatCode),
            "build" => Ok(Self::Build),
            "bump-version" => Ok(Self::BumpVersion),
            _ => Err(Error::UnknownTask(value.to_string())),
        }
    }
}
