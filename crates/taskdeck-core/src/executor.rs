use tracing::{info, instrument, warn};

use crate::command::TaskName;
use crate::error::{Error, Result};
use crate::invocation::CommandInvocation;
use crate::policy::FailurePolicy;
use crate::project::ProjectRoot;
use crate::registry::TaskRegistry;
use crate::runner::CommandRunner;
use crate::task::TaskArgs;

/// One invocation scheduled on behalf of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub task: TaskName,
    pub invocation: CommandInvocation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Succeeded,
    /// Exited non-zero; `None` when killed by a signal.
    Failed(Option<i32>),
    /// The program could not be spawned.
    NotStarted(String),
}

impl StepStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    fn describe(&self) -> String {
        match self {
            Self::Succeeded => "succeeded".to_string(),
            Self::Failed(Some(code)) => format!("exited with status {code}"),
            Self::Failed(None) => "terminated by signal".to_string(),
            Self::NotStarted(reason) => format!("failed to start: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub task: TaskName,
    pub invocation: CommandInvocation,
    pub status: StepStatus,
}

/// What happened during a run, in execution order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub steps: Vec<StepOutcome>,
}

impl RunReport {
    pub fn failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.steps.iter().filter(|step| !step.status.is_success())
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Runs planned tasks one invocation at a time.
#[derive(Debug)]
pub struct Executor<'a> {
    registry: &'a TaskRegistry,
    root: &'a ProjectRoot,
    runner: &'a dyn CommandRunner,
    policy: FailurePolicy,
}

impl<'a> Executor<'a> {
    pub fn new(
        registry: &'a TaskRegistry,
        root: &'a ProjectRoot,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self {
            registry,
            root,
            runner,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Expands `names` through their pre/post hooks and materializes every
    /// body. Nothing is executed, so argument errors surface before any
    /// command starts.
    #[instrument(skip(self, args))]
    pub fn dry_run(&self, names: &[TaskName], args: &TaskArgs) -> Result<Vec<PlannedStep>> {
        let mut steps = Vec::new();
        for name in self.registry.plan_many(names)? {
            let task = self
                .registry
                .get(name)
                .ok_or_else(|| Error::UnknownTask(name.to_string()))?;
            for invocation in task.invocations(self.root, args)? {
                steps.push(PlannedStep {
                    task: name,
                    invocation,
                });
            }
        }
        Ok(steps)
    }

    pub fn run(&self, name: TaskName, args: &TaskArgs) -> Result<RunReport> {
        self.run_many(&[name], args)
    }

    /// Runs every planned step in order.
    ///
    /// Under [`FailurePolicy::Ignore`] a failed step is logged and the run
    /// continues; the call only errors for planning problems. Under
    /// [`FailurePolicy::Abort`] the first failed step ends the run.
    #[instrument(skip(self, args), fields(root = %self.root, policy = ?self.policy))]
    pub fn run_many(&self, names: &[TaskName], args: &TaskArgs) -> Result<RunReport> {
        let steps = self.dry_run(names, args)?;
        let mut report = RunReport::default();

        for step in steps {
            info!(target: "taskdeck", "[{}] {}", step.task, step.invocation);
            let status = match self.runner.run(&step.invocation, self.root.as_path()) {
                Ok(Some(0)) => StepStatus::Succeeded,
                Ok(code) => StepStatus::Failed(code),
                Err(e) => StepStatus::NotStarted(e.to_string()),
            };

            if !status.is_success() {
                match self.policy {
                    FailurePolicy::Ignore => warn!(
                        target: "taskdeck",
                        "[{}] '{}' {}; continuing",
                        step.task,
                        step.invocation,
                        status.describe()
                    ),
                    FailurePolicy::Abort => {
                        return Err(Error::StepFailed {
                            task: step.task,
                            invocation: step.invocation.to_string(),
                            reason: status.describe(),
                        })
                    }
                }
            }

            report.steps.push(StepOutcome {
                task: step.task,
                invocation: step.invocation,
                status,
            });
        }

        Ok(report)
    }
}
