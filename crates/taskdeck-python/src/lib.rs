//! Task bodies for a Poetry-managed Python package tested with Robot Framework.
//!
//! Each body only builds argument vectors; running them is the executor's job.

use taskdeck_core::constants::{LOGS_DIR, PACKAGE_DIR, SUITES_DIR, TEST_LOG_LEVEL};
use taskdeck_core::{
    CommandInvocation, ProjectRoot, Result, Task, TaskArgs, TaskName, TaskRegistry,
};
use tracing::debug;

/// Registers the five contributor tasks with their hooks:
/// `build` runs `format` first, `bump-version` runs `build` afterwards.
pub fn default_registry() -> Result<TaskRegistry> {
    let mut registry = TaskRegistry::default();
    registry.register(Task::new(
        TaskName::Tests,
        "Run the Robot Framework suites",
        tests,
    ))?;
    registry.register(Task::new(
        TaskName::Lint,
        "Type-check, lint the package and check Robot style",
        lint,
    ))?;
    registry.register(Task::new(
        TaskName::FormatCode,
        "Format Python and Robot sources",
        format_code,
    ))?;
    registry.register(
        Task::new(TaskName::Build, "Build the distribution packages", build)
            .with_pre([TaskName::FormatCode]),
    )?;
    registry.register(
        Task::new(
            TaskName::BumpVersion,
            "Bump the version by RULE, reinstall, then build",
            bump_version,
        )
        .with_post([TaskName::Build]),
    )?;
    debug!("python toolchain registry ready");
    Ok(registry)
}

pub fn tests(root: &ProjectRoot, _args: &TaskArgs) -> Result<Vec<CommandInvocation>> {
    Ok(vec![CommandInvocation::new("python").args([
        "-m".to_string(),
        "robot".to_string(),
        format!("--variable=root:{root}"),
        format!("--outputdir={}", root.join(LOGS_DIR)),
        format!("--loglevel={TEST_LOG_LEVEL}"),
        root.join(SUITES_DIR),
    ])])
}

pub fn lint(root: &ProjectRoot, _args: &TaskArgs) -> Result<Vec<CommandInvocation>> {
    Ok(vec![
        CommandInvocation::new("mypy").arg(root.as_str()),
        CommandInvocation::new("pylint").arg(root.join(PACKAGE_DIR)),
        CommandInvocation::new("robocop").arg(root.as_str()),
    ])
}

pub fn format_code(root: &ProjectRoot, _args: &TaskArgs) -> Result<Vec<CommandInvocation>> {
    Ok(vec![
        CommandInvocation::new("black").arg(root.as_str()),
        CommandInvocation::new("isort").arg(root.as_str()),
        CommandInvocation::new("robotidy").arg(root.as_str()),
    ])
}

pub fn build(_root: &ProjectRoot, _args: &TaskArgs) -> Result<Vec<CommandInvocation>> {
    Ok(vec![CommandInvocation::new("poetry").arg("build")])
}

/// The rule is handed to Poetry unvalidated.
pub fn bump_version(_root: &ProjectRoot, args: &TaskArgs) -> Result<Vec<CommandInvocation>> {
    let rule = args.require_rule(TaskName::BumpVersion)?;
    Ok(vec![
        CommandInvocation::new("poetry").args(["version", rule]),
        CommandInvocation::new("poetry").arg("install"),
    ])
}
