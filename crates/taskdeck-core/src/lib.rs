//! Core logic and abstractions for the taskdeck task runner.
//!
//! This crate defines the project root, task names, command invocations,
//! the task registry with its pre/post dependency graph, and the executor
//! that runs planned invocations through a [`CommandRunner`].

pub mod command;
pub mod config;
pub mod constants;
pub mod error;
pub mod executor;
pub mod invocation;
pub mod policy;
pub mod project;
pub mod registry;
pub mod runner;
pub mod task;

pub use command::TaskName;
pub use config::TaskdeckConfig;
pub use error::{Error, Result};
pub use executor::{Executor, PlannedStep, RunReport, StepOutcome, StepStatus};
pub use invocation::CommandInvocation;
pub use policy::FailurePolicy;
pub use project::ProjectRoot;
pub use registry::TaskRegistry;
pub use runner::{CommandRunner, SystemRunner};
pub use task::{Task, TaskArgs, TaskBody};
