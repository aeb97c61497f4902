//! Removal of the scaffolding tool from the project it just set up

use super::package_manager::{CommandRunner, PackageManager};
use crate::error::Result;
use crate::manifest::{edit_file, ManifestPath, PendingMutation, PACKAGE_JSON, PACKAGE_LOCK_JSON};
use std::path::PathBuf;

/// Outcome of the self-removal step
#[derive(Debug)]
pub struct SelfRemovalReport {
    /// Manifest documents that were rewritten
    pub edited: Vec<PathBuf>,
    /// Result of `npm remove`; a failure here does not fail the run
    pub uninstall: Result<()>,
}

/// Entries naming `name` in package.json
fn manifest_mutations(name: &str) -> Vec<PendingMutation> {
    vec![
        PendingMutation::delete(ManifestPath::new(["dependencies", name])),
        PendingMutation::delete(ManifestPath::new(["devDependencies", name])),
    ]
}

/// Entries naming `name` in package-lock.json (v1 and v2+ layouts)
fn lockfile_mutations(name: &str) -> Vec<PendingMutation> {
    let module = format!("node_modules/{}", name);
    vec![
        PendingMutation::delete(ManifestPath::new(["dependencies", name])),
        PendingMutation::delete(ManifestPath::new(["packages", module.as_str()])),
        PendingMutation::delete(ManifestPath::new(["packages", "", "dependencies", name])),
        PendingMutation::delete(ManifestPath::new(["packages", "", "devDependencies", name])),
    ]
}

/// Delete `name` from the manifest and lockfile, then ask the package manager
/// to uninstall it. The manifest edits are the part that must succeed.
pub async fn remove_self<R: CommandRunner>(
    name: &str,
    manager: &PackageManager,
    runner: &mut R,
) -> Result<SelfRemovalReport> {
    let project_dir = manager.project_dir();
    let mut edited = Vec::new();

    for (file, mutations) in [
        (PACKAGE_JSON, manifest_mutations(name)),
        (PACKAGE_LOCK_JSON, lockfile_mutations(name)),
    ] {
        let path = project_dir.join(file);
        if !path.is_file() {
            continue;
        }
        edit_file(&path, &mutations)?;
        edited.push(path);
    }

    let uninstall = runner.run(&manager.remove(name)).await;

    Ok(SelfRemovalReport { edited, uninstall })
}
