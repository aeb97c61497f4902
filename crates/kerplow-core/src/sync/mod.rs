//! Update mode: refresh shared config files in existing projects
//!
//! This module provides:
//! - Repository discovery under a base directory (`--recursive`)
//! - Per-directory overwrite of the shared config files
//! - Retab of tracked text files (`--retab`)

pub mod retab;

pub use retab::{
    retab_files, retab_repository, tracked_files, IndentationJump, Reindent, Reindented,
    RetabOptions, RetabReport, TabFormatter,
};

use crate::error::{KerplowError, Result};
use crate::manifest::PACKAGE_JSON;
use crate::prompt::{Prompter, Question};
use crate::templates::{copy_file, RootManifest};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directories under `base` (itself included) that hold a `.git` directory.
/// `node_modules` and `.git` are not descended into.
pub fn find_repositories(base: &Path) -> Result<Vec<PathBuf>> {
    let mut repositories = Vec::new();
    let mut walker = WalkDir::new(base).sort_by_file_name().into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|e| {
            let context = format!("Failed to read {}", base.display());
            KerplowError::io(context, e.into())
        })?;

        if !entry.file_type().is_dir() {
            continue;
        }

        match entry.file_name().to_str() {
            Some(".git") => {
                if let Some(parent) = entry.path().parent() {
                    repositories.push(parent.to_path_buf());
                }
                walker.skip_current_dir();
            }
            Some("node_modules") => walker.skip_current_dir(),
            _ => {}
        }
    }

    Ok(repositories)
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Offer to overwrite each shared config file that already exists in `dir`.
/// Returns the files that were overwritten.
pub async fn update_directory<P: Prompter>(
    dir: &Path,
    template_root: &Path,
    manifest: &RootManifest,
    prompter: &mut P,
) -> Result<Vec<PathBuf>> {
    // The template tree is not a project
    if same_directory(dir, template_root) {
        return Ok(Vec::new());
    }

    let mut overwritten = Vec::new();

    for shared in &manifest.shared_files {
        let dest = dir.join(shared.destination());
        if !dest.is_file() {
            continue;
        }

        let question = Question::dynamic(format!("Overwrite `{}`?", dest.display()));
        if prompter.ask(&question) {
            copy_file(&template_root.join(&shared.source), &dest).await?;
            overwritten.push(dest);
        }
    }

    Ok(overwritten)
}

/// Ask before updating a directory that does not look like a project.
/// Returns whether to go ahead.
pub fn confirm_project_dir<P: Prompter>(dir: &Path, prompter: &mut P) -> bool {
    if dir.join(PACKAGE_JSON).is_file() {
        return true;
    }
    prompter.ask(&Question::new("Are you sure you're in the right place?").default_no())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::PromptEngine;
    use std::io::Cursor;

    fn engine(input: &str) -> PromptEngine<Cursor<Vec<u8>>, Vec<u8>> {
        PromptEngine::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "").unwrap();
    }

    #[test]
    fn test_find_repositories_skips_node_modules() {
        let base = tempfile::tempdir().unwrap();
        let root = base.path();
        std::fs::create_dir_all(root.join("b-app/.git/refs")).unwrap();
        std::fs::create_dir_all(root.join("a-lib/.git")).unwrap();
        std::fs::create_dir_all(root.join("a-lib/packages/inner/.git")).unwrap();
        std::fs::create_dir_all(root.join("b-app/node_modules/dep/.git")).unwrap();
        std::fs::create_dir_all(root.join("plain/src")).unwrap();

        let repositories = find_repositories(root).unwrap();

        assert_eq!(
            repositories,
            [
                root.join("a-lib"),
                root.join("a-lib/packages/inner"),
                root.join("b-app"),
            ]
        );
    }

    #[test]
    fn test_base_directory_can_be_a_repository() {
        let base = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(base.path().join(".git")).unwrap();
        assert_eq!(
            find_repositories(base.path()).unwrap(),
            [base.path().to_path_buf()]
        );
    }

    #[tokio::test]
    async fn test_update_overwrites_only_existing_and_confirmed() {
        let templates = tempfile::tempdir().unwrap();
        let project = tempfile::tempdir().unwrap();
        for file in [".eslintrc.json", "tsconfig.json", ".vscode/settings.json"] {
            std::fs::create_dir_all(templates.path().join(".vscode")).unwrap();
            std::fs::write(templates.path().join(file), "new").unwrap();
        }
        std::fs::write(project.path().join(".eslintrc.json"), "old").unwrap();
        std::fs::write(project.path().join("tsconfig.json"), "old").unwrap();

        // yes to .eslintrc.json, no to tsconfig.json
        let mut prompter = engine("y\nn\n");
        let overwritten = update_directory(
            project.path(),
            templates.path(),
            &RootManifest::default(),
            &mut prompter,
        )
        .await
        .unwrap();

        assert_eq!(overwritten, [project.path().join(".eslintrc.json")]);
        let read = |file: &str| std::fs::read_to_string(project.path().join(file)).unwrap();
        assert_eq!(read(".eslintrc.json"), "new");
        assert_eq!(read("tsconfig.json"), "old");
        assert!(!project.path().join(".vscode/settings.json").exists());

        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert!(output.contains("tsconfig.json`? [Y/n]"));
    }

    #[tokio::test]
    async fn test_template_root_is_never_updated() {
        let templates = tempfile::tempdir().unwrap();
        touch(&templates.path().join("tsconfig.json"));

        let mut prompter = PromptEngine::new(Cursor::new(Vec::new()), Vec::new());
        let overwritten = update_directory(
            templates.path(),
            templates.path(),
            &RootManifest::default(),
            &mut prompter,
        )
        .await
        .unwrap();

        assert!(overwritten.is_empty());
        assert!(prompter.into_output().is_empty());
    }

    #[test]
    fn test_project_dir_confirmation() {
        let dir = tempfile::tempdir().unwrap();

        let mut prompter = engine("\n");
        assert!(!confirm_project_dir(dir.path(), &mut prompter));

        let mut prompter = engine("yes\n");
        assert!(confirm_project_dir(dir.path(), &mut prompter));

        touch(&dir.path().join(PACKAGE_JSON));
        let mut prompter = engine("");
        assert!(confirm_project_dir(dir.path(), &mut prompter));
        assert!(prompter.into_output().is_empty());
    }
}
