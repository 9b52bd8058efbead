use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;

use taskdeck_core::{
    CommandRunner, Executor, ProjectRoot, SystemRunner, TaskArgs, TaskName, TaskRegistry,
    TaskdeckConfig,
};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod list;
mod styles;

use styles as s;

/// The command-line interface for taskdeck.
#[derive(Debug, Parser)]
#[command(name = "tdk")]
#[command(version)]
#[command(styles = s::get_clap_styles())]
#[command(
    help_template = "{bin} {version}\n\n{about-with-newline}{usage-heading} {usage}\n\n{all-args}{after-help}"
)]
#[command(about = "Contributor task runner for the Python toolchain")]
#[command(
    long_about = "taskdeck gives contributors one command surface over the project's
test runner, type checker, linters, formatters and packaging tool.

Tasks:
  tests             Run the Robot Framework suites
  lint              Type-check, lint the package and check Robot style
  format            Format Python and Robot sources
  build             Format, then build the distribution packages
  bump-version      Bump the version by RULE, reinstall, then build
"
)]
#[command(
    after_help = "\x1b[1;32mExamples:\x1b[0m\n  \x1b[36mtdk tests\x1b[0m                 \x1b[2m# Run the acceptance suites\x1b[0m\n  \x1b[36mtdk lint tests\x1b[0m            \x1b[2m# Lint, then run the suites\x1b[0m\n  \x1b[36mtdk build\x1b[0m                 \x1b[2m# Format, then package\x1b[0m\n  \x1b[36mtdk bump-version minor\x1b[0m    \x1b[2m# Bump, reinstall and build\x1b[0m\n  \x1b[36mtdk --dry-run build\x1b[0m       \x1b[2m# Show the commands without running them\x1b[0m"
)]
pub(crate) struct Cli {
    /// Tasks to run in order: tests, lint, format, build, bump-version.
    /// `bump-version` takes its rule as the next argument.
    tasks: Vec<String>,
    /// Version-increment rule for `bump-version` (for example: patch, minor, major)
    #[arg(long)]
    rule: Option<String>,
    /// Path to the task-definition file; its directory becomes the project root.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Project root to use instead of searching upwards for taskdeck.toml or pyproject.toml.
    #[arg(long, conflicts_with = "config")]
    root: Option<PathBuf>,
    /// List available tasks and their pre/post hooks.
    #[arg(short, long, default_value_t = false)]
    list: bool,
    /// Print the planned commands without running them.
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .init();

    let cli = Cli::parse();
    debug!("parsed cli arguments: {:?}", cli);

    let registry = taskdeck_python::default_registry()?;

    if cli.list {
        print!("{}", list::render(&registry));
        return Ok(());
    }

    if cli.tasks.is_empty() {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    let (tasks, args) = parse_tasks(&cli.tasks, cli.rule.as_deref())?;

    let (root, cfg) = resolve_project(&cli)?;
    info!("project root: {}", root);

    execute(&cli, &tasks, &args, &root, &cfg, &registry, &SystemRunner)
}

/// Uses the `RUST_LOG` directives when they parse, `info` otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Splits the positional arguments into task names and the `bump-version` rule.
///
/// The argument after `bump-version` is its rule unless it names a task or
/// the rule was already given with `--rule`.
fn parse_tasks(raw: &[String], rule_flag: Option<&str>) -> Result<(Vec<TaskName>, TaskArgs)> {
    let mut rule = rule_flag.map(ToOwned::to_owned);
    let mut tasks = Vec::new();
    let mut iter = raw.iter().peekable();

    while let Some(text) = iter.next() {
        let task = TaskName::from_str(text)
            .map_err(|e| anyhow!("failed to parse task '{}': {e}", text))?;

        if task == TaskName::BumpVersion && rule.is_none() {
            if let Some(next) = iter.next_if(|next| TaskName::from_str(next).is_err()) {
                rule = Some(next.clone());
            }
        }
        tasks.push(task);
    }

    if rule.is_some() && !tasks.contains(&TaskName::BumpVersion) {
        bail!("only '{}' takes a rule", TaskName::BumpVersion);
    }

    Ok((tasks, TaskArgs { rule }))
}

/// Resolves the project root once and loads its optional config.
fn resolve_project(cli: &Cli) -> Result<(ProjectRoot, TaskdeckConfig)> {
    if let Some(path) = &cli.config {
        let root = ProjectRoot::from_task_file(path)?;
        let cfg = TaskdeckConfig::load_from_file(path)
            .with_context(|| format!("unable to load config '{}'", path.display()))?;
        return Ok((root, cfg));
    }

    let root = match &cli.root {
        Some(dir) => {
            let dir = dir
                .canonicalize()
                .with_context(|| format!("invalid project root '{}'", dir.display()))?;
            ProjectRoot::new(dir)
        }
        None => {
            let cwd = std::env::current_dir().context("unable to read current directory")?;
            ProjectRoot::discover(&cwd)?
        }
    };

    let config_path = root.config_file();
    let cfg = TaskdeckConfig::load_or_default(&config_path)
        .with_context(|| format!("unable to load config '{}'", config_path.display()))?;
    Ok((root, cfg))
}

/// Plans and runs `tasks` as one plan, or prints it under `--dry-run`.
fn execute(
    cli: &Cli,
    tasks: &[TaskName],
    args: &TaskArgs,
    root: &ProjectRoot,
    cfg: &TaskdeckConfig,
    registry: &TaskRegistry,
    runner: &dyn CommandRunner,
) -> Result<()> {
    let executor = Executor::new(registry, root, runner).with_policy(cfg.runner.on_failure);

    if cli.dry_run {
        for step in executor.dry_run(tasks, args)? {
            println!("[{}] {}", step.task, step.invocation);
        }
        return Ok(());
    }

    let label = tasks
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let report = executor
        .run_many(tasks, args)
        .with_context(|| format!("'{}' did not complete", label))?;

    let failed = report.failures().count();
    if failed > 0 {
        warn!(
            "{} finished; {} of {} commands failed",
            label,
            failed,
            report.steps.len()
        );
    } else {
        info!("{} finished", label);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io;
    use std::path::Path;
    use taskdeck_core::{CommandInvocation, FailurePolicy};
    use tempfile::tempdir;

    #[derive(Debug, Default)]
    struct FailingRunner {
        calls: RefCell<Vec<String>>,
    }

    impl CommandRunner for FailingRunner {
        fn run(&self, invocation: &CommandInvocation, _cwd: &Path) -> io::Result<Option<i32>> {
            self.calls.borrow_mut().push(invocation.to_string());
            Ok(Some(1))
        }
    }

    fn cli_from(argv: &[&str]) -> Cli {
        Cli::try_parse_from(argv).expect("arguments should parse")
    }

    fn run_cli(argv: &[&str], cfg: &TaskdeckConfig, runner: &FailingRunner) -> Result<()> {
        let cli = cli_from(argv);
        let registry = taskdeck_python::default_registry().unwrap();
        let root = ProjectRoot::new("/srv/driver");
        let (tasks, args) = parse_tasks(&cli.tasks, cli.rule.as_deref())?;
        execute(&cli, &tasks, &args, &root, cfg, &registry, runner)
    }

    #[test]
    fn log_level_defaults_to_info() {
        let hint = log_filter(None).max_level_hint();
        assert_eq!(hint, Some(tracing::level_filters::LevelFilter::INFO));
    }

    #[test]
    fn rust_log_global_level_is_honoured() {
        let hint = log_filter(Some("debug")).max_level_hint();
        assert_eq!(hint, Some(tracing::level_filters::LevelFilter::DEBUG));
    }

    #[test]
    fn smoke_test_execute_ignores_failed_commands() {
        let runner = FailingRunner::default();
        run_cli(&["tdk", "build"], &TaskdeckConfig::default(), &runner)
            .expect("failures are ignored by default");
        assert_eq!(runner.calls.borrow().len(), 4);
    }

    #[test]
    fn several_tasks_run_in_one_invocation() {
        let runner = FailingRunner::default();
        run_cli(&["tdk", "lint", "tests"], &TaskdeckConfig::default(), &runner).unwrap();

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0], "mypy /srv/driver");
        assert!(calls[3].starts_with("python -m robot"));
    }

    #[test]
    fn shared_pre_task_runs_once() {
        let runner = FailingRunner::default();
        run_cli(&["tdk", "build", "format"], &TaskdeckConfig::default(), &runner).unwrap();

        let calls = runner.calls.borrow();
        assert_eq!(
            *calls,
            vec![
                "black /srv/driver",
                "isort /srv/driver",
                "robotidy /srv/driver",
                "poetry build",
            ]
        );
    }

    #[test]
    fn positional_rule_follows_bump_version() {
        let (tasks, args) = parse_tasks(
            &["bump-version".to_string(), "minor".to_string(), "lint".to_string()],
            None,
        )
        .unwrap();
        assert_eq!(tasks, vec![TaskName::BumpVersion, TaskName::Lint]);
        assert_eq!(args.rule.as_deref(), Some("minor"));
    }

    #[test]
    fn task_after_bump_version_is_not_taken_as_rule() {
        let runner = FailingRunner::default();
        let err = run_cli(
            &["tdk", "bump-version", "lint"],
            &TaskdeckConfig::default(),
            &runner,
        )
        .expect_err("rule is missing");
        assert!(format!("{err:#}").contains("requires argument 'rule'"));
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn rule_flag_is_accepted() {
        let runner = FailingRunner::default();
        run_cli(
            &["tdk", "--rule", "patch", "bump-version"],
            &TaskdeckConfig::default(),
            &runner,
        )
        .unwrap();
        assert_eq!(runner.calls.borrow()[0], "poetry version patch");
    }

    #[test]
    fn rule_is_rejected_for_other_tasks() {
        let err =
            parse_tasks(&["lint".to_string()], Some("minor")).expect_err("lint takes no rule");
        assert!(err.to_string().contains("takes a rule"));
    }

    #[test]
    fn unknown_task_is_rejected() {
        let err = parse_tasks(&["lint".to_string(), "deploy".to_string()], None)
            .expect_err("deploy is not a task");
        assert!(err.to_string().contains("deploy"));
    }

    #[test]
    fn abort_policy_surfaces_failure() {
        let runner = FailingRunner::default();
        let mut cfg = TaskdeckConfig::default();
        cfg.runner.on_failure = FailurePolicy::Abort;

        let result = run_cli(&["tdk", "lint"], &cfg, &runner);
        assert!(result.is_err());
        assert_eq!(*runner.calls.borrow(), vec!["mypy /srv/driver"]);
    }

    #[test]
    fn dry_run_executes_nothing() {
        let runner = FailingRunner::default();
        run_cli(
            &["tdk", "--dry-run", "bump-version", "patch"],
            &TaskdeckConfig::default(),
            &runner,
        )
        .unwrap();
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn integration_test_config_flag_sets_root_and_policy() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("taskdeck.toml");
        std::fs::write(&path, "[runner]\non_failure = \"abort\"\n").unwrap();

        let mut cli = cli_from(&["tdk", "tests"]);
        cli.config = Some(path);

        let (root, cfg) = resolve_project(&cli).unwrap();
        assert_eq!(root, ProjectRoot::new(dir.path().canonicalize().unwrap()));
        assert_eq!(cfg.runner.on_failure, FailurePolicy::Abort);
    }

    #[test]
    fn integration_test_root_flag_without_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let mut cli = cli_from(&["tdk", "tests"]);
        cli.root = Some(dir.path().to_path_buf());

        let (root, cfg) = resolve_project(&cli).unwrap();
        assert_eq!(root, ProjectRoot::new(dir.path().canonicalize().unwrap()));
        assert_eq!(cfg.runner.on_failure, FailurePolicy::Ignore);
    }
}
