//! Scaffold mode: from an empty (or freshly initialized) directory to an
//! installed project

use crate::error::Result;
use crate::manifest::{edit_file, PACKAGE_JSON};
use crate::prompt::Prompter;
use crate::runtime::{
    remove_self, CommandRunner, DependencyInstaller, EmptySetPolicy, Invocation, PackageManager,
    SelfRemovalReport,
};
use crate::templates::TemplateInstaller;
use crate::wizard::{run_wizard, WizardState, NODES};
use std::path::PathBuf;

/// Inputs of a scaffold run
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    pub project_dir: PathBuf,
    pub template_dir: PathBuf,
    /// The tool's own package name, removed from the project at the end
    pub tool_name: String,
    pub package_manager: String,
    /// Answer every question with its non-interactive answer
    pub assume_yes: bool,
    pub self_remove: bool,
    pub empty_sets: EmptySetPolicy,
}

/// What a scaffold run did
#[derive(Debug)]
pub struct ScaffoldOutcome {
    pub state: WizardState,
    /// `npm init`, if it ran
    pub initialized: Option<Invocation>,
    pub installs: Vec<Invocation>,
    /// `None` when self-removal was turned off
    pub self_removal: Option<SelfRemovalReport>,
}

/// Run the whole scaffold: init, wizard, manifest flush, installs, self-removal
pub async fn scaffold<P, R>(
    options: &ScaffoldOptions,
    prompter: &mut P,
    runner: &mut R,
) -> Result<ScaffoldOutcome>
where
    P: Prompter,
    R: CommandRunner,
{
    let manager = PackageManager::new(&options.package_manager, &options.project_dir);
    let manifest = options.project_dir.join(PACKAGE_JSON);

    let initialized = if manifest.is_file() {
        None
    } else {
        let init = manager.init(options.assume_yes);
        runner.run(&init).await?;
        Some(init)
    };

    let installer = TemplateInstaller::new(&options.template_dir, &options.project_dir);
    let state = run_wizard(NODES, prompter, &installer, WizardState::new()).await?;

    edit_file(&manifest, &state.mutations)?;

    let installs = DependencyInstaller::new(manager.clone(), options.empty_sets)
        .finalize(runner, &state.dependencies)
        .await?;

    let self_removal = if options.self_remove {
        Some(remove_self(&options.tool_name, &manager, runner).await?)
    } else {
        None
    };

    Ok(ScaffoldOutcome {
        state,
        initialized,
        installs,
        self_removal,
    })
}
