use taskdeck_core::{TaskName, TaskRegistry};

use crate::styles::{paint, HOOK, TASK};

/// Renders `tdk --list`: one line per task with its hooks.
pub fn render(registry: &TaskRegistry) -> String {
    let mut out = String::from("Available tasks:\n\n");
    for task in registry.tasks() {
        let name = format!("{:<14}", task.name.as_str());
        out.push_str(&format!("  {} {}", paint(TASK, &name), task.help));

        let hooks = describe_hooks(&task.pre, &task.post);
        if !hooks.is_empty() {
            out.push_str(&format!(" {}", paint(HOOK, &format!("({hooks})"))));
        }
        out.push('\n');
    }
    out
}

fn describe_hooks(pre: &[TaskName], post: &[TaskName]) -> String {
    let join = |names: &[TaskName]| {
        names
            .iter()
            .map(|n| n.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut parts = Vec::new();
    if !pre.is_empty() {
        parts.push(format!("pre: {}", join(pre)));
    }
    if !post.is_empty() {
        parts.push(format!("post: {}", join(post)));
    }
    parts.join("; ")
}
