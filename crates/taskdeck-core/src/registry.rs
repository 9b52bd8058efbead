use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::command::TaskName;
use crate::error::{Error, Result};
use crate::task::Task;

/// The set of invokable tasks and their static pre/post graph.
///
/// Dependencies are resolved when a task is registered, so a task may only
/// name tasks registered before it. That keeps the graph acyclic by
/// construction; the only cycle left to reject is a task naming itself.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
}

impl TaskRegistry {
    /// Registers a task after validating its name and dependencies.
    ///
    /// # Errors
    /// Fails on a duplicate name, a self-dependency, or a dependency that is
    /// not registered yet.
    pub fn register(&mut self, task: Task) -> Result<()> {
        if self.get(task.name).is_some() {
            return Err(Error::DuplicateTask(task.name));
        }

        for dependency in task.pre.iter().chain(task.post.iter()).copied() {
            if dependency == task.name {
                return Err(Error::Cycle(task.name));
            }
            if self.get(dependency).is_none() {
                return Err(Error::UnknownDependency {
                    task: task.name,
                    dependency,
                });
            }
        }

        debug!(
            "registered task {} (pre={:?}, post={:?})",
            task.name, task.pre, task.post
        );
        self.tasks.push(task);
        Ok(())
    }

    pub fn get(&self, name: TaskName) -> Option<&Task> {
        self.tasks.iter().find(|task| task.name == name)
    }

    /// All tasks in registration order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Flattens the pre/post graph below `name` into execution order.
    pub fn plan(&self, name: TaskName) -> Result<Vec<TaskName>> {
        self.plan_many(&[name])
    }

    /// Plans several tasks at once. A task runs at most once per plan; its
    /// first position wins.
    #[instrument(skip(self))]
    pub fn plan_many(&self, names: &[TaskName]) -> Result<Vec<TaskName>> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        for name in names {
            self.expand(*name, &mut seen, &mut order)?;
        }
        debug!("planned {:?}", order);
        Ok(order)
    }

    fn expand(
        &self,
        name: TaskName,
        seen: &mut HashSet<TaskName>,
        order: &mut Vec<TaskName>,
    ) -> Result<()> {
        let task = self
            .get(name)
            .ok_or_else(|| Error::UnknownTask(name.to_string()))?;
        if !seen.insert(name) {
            return Ok(());
        }

        for pre in &task.pre {
            self.expand(*pre, seen, order)?;
        }
        order.push(name);
        for post in &task.post {
            self.expand(*post, seen, order)?;
        }
        Ok(())
    }
}
