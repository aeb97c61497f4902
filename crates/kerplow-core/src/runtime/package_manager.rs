//! Package manager invocation and dependency accumulation

use crate::error::{KerplowError, Result};
use colored::Colorize;
use indexmap::IndexSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// A command line to run in the project directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs invocations. Stdio is inherited; the only result is success or the exit code.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&mut self, invocation: &Invocation) -> Result<()>;
}

/// Spawns real processes and waits for them
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&mut self, invocation: &Invocation) -> Result<()> {
        let command = invocation.to_string();
        println!();
        println!("{} {}", "Running:".dimmed(), command.yellow());
        println!();

        let status = tokio::process::Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .status()
            .await
            .map_err(|source| KerplowError::Spawn {
                command: command.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(KerplowError::ManagerInvocation {
                command,
                code: status.code(),
            })
        }
    }
}

/// Builds invocations of the package manager for one project
#[derive(Debug, Clone)]
pub struct PackageManager {
    program: String,
    project_dir: PathBuf,
}

impl PackageManager {
    pub fn new(program: impl Into<String>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            project_dir: project_dir.into(),
        }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    fn invocation<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation {
            program: self.program.clone(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: self.project_dir.clone(),
        }
    }

    /// `npm init`, or `npm init -y` when not prompting
    pub fn init(&self, assume_yes: bool) -> Invocation {
        if assume_yes {
            self.invocation(["init", "-y"])
        } else {
            self.invocation(["init"])
        }
    }

    pub fn install<'a>(&self, kind: DependencyKind, names: impl IntoIterator<Item = &'a str>) -> Invocation {
        let mut args = vec!["install".to_string()];
        if kind == DependencyKind::Dev {
            args.push("--save-dev".to_string());
        }
        args.extend(names.into_iter().map(str::to_string));
        self.invocation(args)
    }

    pub fn remove(&self, name: &str) -> Invocation {
        self.invocation(["remove", name])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    Runtime,
    Dev,
}

/// Package names queued for installation, in insertion order, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    runtime: IndexSet<String>,
    dev: IndexSet<String>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    fn set_mut(&mut self, kind: DependencyKind) -> &mut IndexSet<String> {
        match kind {
            DependencyKind::Runtime => &mut self.runtime,
            DependencyKind::Dev => &mut self.dev,
        }
    }

    fn set(&self, kind: DependencyKind) -> &IndexSet<String> {
        match kind {
            DependencyKind::Runtime => &self.runtime,
            DependencyKind::Dev => &self.dev,
        }
    }

    /// Queue a package; returns false if it was already queued
    pub fn add(&mut self, kind: DependencyKind, name: impl Into<String>) -> bool {
        self.set_mut(kind).insert(name.into())
    }

    /// Drop a queued package, keeping the order of the rest
    pub fn remove(&mut self, kind: DependencyKind, name: &str) -> bool {
        self.set_mut(kind).shift_remove(name)
    }

    pub fn contains(&self, kind: DependencyKind, name: &str) -> bool {
        self.set(kind).contains(name)
    }

    pub fn names(&self, kind: DependencyKind) -> impl Iterator<Item = &str> {
        self.set(kind).iter().map(String::as_str)
    }

    pub fn is_empty(&self, kind: DependencyKind) -> bool {
        self.set(kind).is_empty()
    }
}

/// What to do when a dependency set is empty at the end of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptySetPolicy {
    /// Still run `npm install` with no names (installs what the manifest lists)
    #[default]
    Invoke,
    /// Do not invoke the package manager for an empty set
    Skip,
}

/// Runs the two install commands once the wizard is done
#[derive(Debug, Clone)]
pub struct DependencyInstaller {
    manager: PackageManager,
    policy: EmptySetPolicy,
}

impl DependencyInstaller {
    pub fn new(manager: PackageManager, policy: EmptySetPolicy) -> Self {
        Self { manager, policy }
    }

    /// Install runtime then dev dependencies. Stops at the first failure.
    /// Returns the invocations that ran.
    pub async fn finalize<R: CommandRunner>(
        &self,
        runner: &mut R,
        dependencies: &DependencySet,
    ) -> Result<Vec<Invocation>> {
        let mut ran = Vec::new();

        for kind in [DependencyKind::Runtime, DependencyKind::Dev] {
            if self.policy == EmptySetPolicy::Skip && dependencies.is_empty(kind) {
                continue;
            }

            let invocation = self.manager.install(kind, dependencies.names(kind));
            runner.run(&invocation).await?;
            ran.push(invocation);
        }

        Ok(ran)
    }
}
