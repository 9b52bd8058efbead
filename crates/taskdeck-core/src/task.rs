use std::fmt::{Debug, Formatter};

use crate::command::TaskName;
use crate::error::{Error, Result};
use crate::invocation::CommandInvocation;
use crate::project::ProjectRoot;

/// Builds the ordered command list of a task for one run.
pub type TaskBody = fn(&ProjectRoot, &TaskArgs) -> Result<Vec<CommandInvocation>>;

/// Arguments supplied on the command line for a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskArgs {
    /// Version-increment rule, forwarded verbatim to the packaging tool.
    pub rule: Option<String>,
}

impl TaskArgs {
    pub fn with_rule(rule: impl Into<String>) -> Self {
        Self {
            rule: Some(rule.into()),
        }
    }

    pub fn require_rule(&self, task: TaskName) -> Result<&str> {
        self.rule.as_deref().ok_or(Error::MissingArgument {
            task,
            argument: "rule",
        })
    }
}

/// A named unit of work with pre-tasks, a body and post-tasks.
#[derive(Clone)]
pub struct Task {
    pub name: TaskName,
    /// One-line description shown by `--list`.
    pub help: &'static str,
    pub pre: Vec<TaskName>,
    pub post: Vec<TaskName>,
    body: TaskBody,
}

impl Task {
    pub fn new(name: TaskName, help: &'static str, body: TaskBody) -> Self {
        Self {
            name,
            help,
            pre: Vec::new(),
            post: Vec::new(),
            body,
        }
    }

    pub fn with_pre(mut self, tasks: impl IntoIterator<Item = TaskName>) -> Self {
        self.pre.extend(tasks);
        self
    }

    pub fn with_post(mut self, tasks: impl IntoIterator<Item = TaskName>) -> Self {
        self.post.extend(tasks);
        self
    }

    /// Materializes the body against `root`. Runs nothing.
    pub fn invocations(
        &self,
        root: &ProjectRoot,
        args: &TaskArgs,
    ) -> Result<Vec<CommandInvocation>> {
        (self.body)(root, args)
    }
}

impl Debug for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("pre", &self.pre)
            .field("post", &self.post)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(_root: &ProjectRoot, args: &TaskArgs) -> Result<Vec<CommandInvocation>> {
        let rule = args.require_rule(TaskName::BumpVersion)?;
        Ok(vec![CommandInvocation::new("poetry").args(["version", rule])])
    }

    #[test]
    fn body_receives_arguments() {
        let task = Task::new(TaskName::BumpVersion, "bump", version);
        let root = ProjectRoot::new("/work");
        let out = task.invocations(&root, &TaskArgs::with_rule("patch")).unwrap();
        assert_eq!(out[0].to_string(), "poetry version patch");
    }

    #[test]
    fn missing_rule_is_reported() {
        let task = Task::new(TaskName::BumpVersion, "bump", version);
        let root = ProjectRoot::new("/work");
        let err = task
            .invocations(&root, &TaskArgs::default())
            .expect_err("rule is required");
        assert!(matches!(
            err,
            Error::MissingArgument {
                task: TaskName::BumpVersion,
                argument: "rule"
            }
        ));
    }
}
