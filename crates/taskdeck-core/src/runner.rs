use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::invocation::CommandInvocation;

/// Runs one invocation to completion.
pub trait CommandRunner: std::fmt::Debug {
    /// Returns the exit code, or `None` when the child was killed by a signal.
    ///
    /// # Errors
    /// Returns the spawn error when the program could not be started.
    fn run(&self, invocation: &CommandInvocation, cwd: &Path) -> io::Result<Option<i32>>;
}

/// Spawns real child processes that share the runner's console.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &CommandInvocation, cwd: &Path) -> io::Result<Option<i32>> {
        debug!("spawning '{}' in {}", invocation, cwd.display());
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;
        Ok(status.code())
    }
}
