//! Run narration using cliclack

use crate::product::ProductConfig;
use crate::prompt::PromptEngine;
use crate::runtime::{check_runtimes, EmptySetPolicy, Shell, SystemRunner};
use crate::scaffold::{scaffold, ScaffoldOptions, ScaffoldOutcome};
use crate::sync::{
    confirm_project_dir, find_repositories, retab_repository, update_directory, RetabOptions,
    TabFormatter,
};
use crate::templates::RootManifest;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Arguments for a run
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    /// Project (or, with `recursive`, base) directory; defaults to cwd
    pub directory: Option<PathBuf>,

    /// Template tree to install from
    pub template_dir: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,

    /// Refresh shared config files instead of scaffolding
    pub update: bool,

    /// With `update`, walk every repository under the directory
    pub recursive: bool,

    /// With `update`, re-indent tracked text files
    pub retab: bool,

    /// Base names never retabbed; empty means the defaults
    pub exclude: Vec<String>,

    /// With `retab`, report without writing
    pub dry_run: bool,

    /// Leave the tool installed in the project
    pub no_self_remove: bool,

    /// Do not run the package manager for an empty dependency set
    pub skip_empty_installs: bool,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    /// The tool removed itself from the project
    SelfDestructed,
    /// The user declined to continue
    Aborted,
}

impl RunOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            RunOutcome::SelfDestructed => 1,
            RunOutcome::Completed | RunOutcome::Aborted => 0,
        }
    }
}

/// Run the CLI
pub async fn run<C: ProductConfig>(config: &C, args: RunArgs) -> Result<RunOutcome> {
    cliclack::intro(config.display_name())?;

    let directory = resolve_directory(&args)?;
    let template_dir = config.template_dir(args.template_dir.clone());
    cliclack::log::info(format!("Using templates from {}", template_dir.display()))?;

    let stdin = std::io::stdin();
    let mut prompter = PromptEngine::new(stdin.lock(), std::io::stdout()).assume_yes(args.yes);

    if args.update {
        run_update(&args, &directory, &template_dir, &mut prompter).await
    } else {
        run_scaffold(config, &args, directory, template_dir, &mut prompter).await
    }
}

fn resolve_directory(args: &RunArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().context("Failed to read current directory")?;
    let path = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    if !path.is_dir() {
        anyhow::bail!("Directory does not exist: {}", path.display());
    }

    Ok(path)
}

async fn run_scaffold<C, R, W>(
    config: &C,
    args: &RunArgs,
    project_dir: PathBuf,
    template_dir: PathBuf,
    prompter: &mut PromptEngine<R, W>,
) -> Result<RunOutcome>
where
    C: ProductConfig,
    R: BufRead,
    W: Write,
{
    let spinner = cliclack::spinner();
    spinner.start("Checking runtimes...");
    match check_runtimes(config.package_manager()) {
        Ok(runtimes) => {
            let runtime_info: Vec<String> = runtimes
                .iter()
                .map(|r| {
                    if r.available {
                        format!("{} ({})", r.name, r.version.as_deref().unwrap_or("unknown"))
                    } else {
                        format!("{} (not installed)", r.name)
                    }
                })
                .collect();
            spinner.stop(format!("Detected runtimes: {}", runtime_info.join(", ")));
        }
        Err(e) => {
            spinner.stop("Missing runtimes");
            cliclack::log::error(format!("{}", e))?;
            anyhow::bail!("Please install the missing runtimes and try again.");
        }
    }

    let options = ScaffoldOptions {
        project_dir,
        template_dir,
        tool_name: config.name().to_string(),
        package_manager: config.package_manager().to_string(),
        assume_yes: args.yes,
        self_remove: !args.no_self_remove,
        empty_sets: if args.skip_empty_installs {
            EmptySetPolicy::Skip
        } else {
            EmptySetPolicy::Invoke
        },
    };

    let outcome = scaffold(&options, prompter, &mut SystemRunner).await?;
    report_scaffold(&outcome)?;

    match outcome.self_removal {
        Some(report) => {
            if let Err(e) = report.uninstall {
                cliclack::log::warning(format!("Uninstall failed, ignoring: {}", e))?;
            }
            self_destruct(config).await?;
            Ok(RunOutcome::SelfDestructed)
        }
        None => {
            cliclack::outro("Happy coding!")?;
            Ok(RunOutcome::Completed)
        }
    }
}

fn report_scaffold(outcome: &ScaffoldOutcome) -> Result<()> {
    let chosen: Vec<String> = outcome
        .state
        .answers
        .iter()
        .filter(|(_, answer)| *answer)
        .map(|(topic, _)| topic.to_string())
        .collect();

    if chosen.is_empty() {
        cliclack::log::info("No optional tools selected")?;
    } else {
        cliclack::log::success(format!("Set up: {}", chosen.join(", ")))?;
    }
    cliclack::log::info(format!(
        "Copied {} template files, ran {} installs",
        outcome.state.copied.len(),
        outcome.installs.len()
    ))?;
    cliclack::note("Next steps", "npm start")?;

    Ok(())
}

async fn self_destruct<C: ProductConfig>(config: &C) -> Result<()> {
    let pause = config.self_destruct_pause();
    for line in [
        format!("{} will now self-destruct.", config.name()),
        "You will see an error message.".to_string(),
        "Please disregard.".to_string(),
    ] {
        println!("{}", line);
        tokio::time::sleep(pause).await;
    }

    println!();
    println!("{}", format!("{}!", config.name().to_uppercase()).red().bold());
    println!();

    Ok(())
}

async fn run_update<R: BufRead, W: Write>(
    args: &RunArgs,
    directory: &Path,
    template_dir: &Path,
    prompter: &mut PromptEngine<R, W>,
) -> Result<RunOutcome> {
    let manifest = RootManifest::load(template_dir)?;

    let repositories = if args.recursive {
        let repositories = find_repositories(directory)?;
        cliclack::log::info(format!("Found {} repositories", repositories.len()))?;
        repositories
    } else {
        if !confirm_project_dir(directory, prompter) {
            cliclack::outro_cancel("Update cancelled")?;
            return Ok(RunOutcome::Aborted);
        }
        vec![directory.to_path_buf()]
    };

    for repository in &repositories {
        let overwritten = update_directory(repository, template_dir, &manifest, prompter)
            .await
            .with_context(|| format!("Failed to update {}", repository.display()))?;
        for file in overwritten {
            cliclack::log::step(format!("Updated {}", file.display()))?;
        }
    }

    if args.retab {
        retab(args, &repositories)?;
    }

    cliclack::outro("Up to date")?;
    Ok(RunOutcome::Completed)
}

fn retab(args: &RunArgs, repositories: &[PathBuf]) -> Result<()> {
    let shell = Shell::detect()?;
    let mut options = RetabOptions {
        dry_run: args.dry_run,
        ..RetabOptions::default()
    };
    if !args.exclude.is_empty() {
        options.exclude = args.exclude.clone();
    }

    for repository in repositories {
        let report = retab_repository(&shell, repository, &TabFormatter, &options)
            .with_context(|| format!("Failed to retab {}", repository.display()))?;

        for warning in &report.warnings {
            cliclack::log::warning(warning.to_string())?;
        }

        let verb = if args.dry_run { "Would retab" } else { "Retabbed" };
        cliclack::log::step(format!(
            "{} {} of {} files in {}",
            verb,
            report.changed.len(),
            report.checked.len(),
            repository.display()
        ))?;
    }

    Ok(())
}
