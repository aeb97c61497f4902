//! The question-driven wizard
//!
//! Walks [`graph::NODES`] in order. Each asked node shows its blurb, takes one
//! yes/no answer and applies the matching effects to the [`WizardState`].

pub mod graph;
pub mod state;
pub mod topic;

pub use graph::{Evaluation, Node, NODES};
pub use state::{Answers, Effect, Effects, WizardState};
pub use topic::Topic;

use crate::error::Result;
use crate::prompt::Prompter;
use crate::templates::TemplateInstaller;

/// Evaluate and apply a single node
pub async fn step<P: Prompter>(
    node: &Node,
    mut state: WizardState,
    prompter: &mut P,
    installer: &TemplateInstaller,
) -> Result<WizardState> {
    match node.evaluate(&state.answers) {
        Evaluation::Skip => Ok(state),
        Evaluation::Apply(effects) => state.apply(effects, installer).await,
        Evaluation::Ask {
            topic,
            on_yes,
            on_no,
        } => {
            prompter.describe(topic.blurb());
            let answer = prompter.ask(&topic.question());
            state.answers.record(topic, answer)?;
            let effects = if answer { on_yes } else { on_no };
            state.apply(effects, installer).await
        }
    }
}

/// Run every node in order, starting from `state`
pub async fn run_wizard<P: Prompter>(
    nodes: &[Node],
    prompter: &mut P,
    installer: &TemplateInstaller,
    mut state: WizardState,
) -> Result<WizardState> {
    for node in nodes {
        state = step(node, state, prompter, installer).await?;
    }
    Ok(state)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::manifest::PendingMutation;
    use crate::prompt::PromptEngine;
    use crate::runtime::DependencyKind;
    use std::io::Cursor;
    use std::path::Path;

    /// Every template file the wizard can copy
    const TEMPLATE_FILES: &[&str] = &[
        ".eslintrc.json",
        "tsconfig.json",
        ".gitignore",
        ".vscode/extensions.json",
        ".vscode/settings.json",
        "dotfiles/.vscode/ts/launch.json",
        "dotfiles/.vscode/js/launch.json",
        "dotfiles/.vscode/express/ts/launch.json",
        "dotfiles/.vscode/express/js/launch.json",
        "dotfiles/express/ts/config.ts",
        "dotfiles/express/ts/server.ts",
        "dotfiles/express/ts/routes/index.ts",
        "dotfiles/express/js/config.js",
        "dotfiles/express/js/server.js",
        "dotfiles/express/js/routes/index.js",
        "dotfiles/express/public/css/style.css",
        "dotfiles/express/public/css/lib/baseline.css",
        "dotfiles/express/public/images/image01.jpg",
        "dotfiles/express/public/images/image02.jpg",
        "dotfiles/express/public/js/main.js",
        "dotfiles/express/views/pages/index.ejs",
        "dotfiles/express/views/partials/_header.ejs",
        "dotfiles/express/views/partials/_footer.ejs",
        "dotfiles/rollup.config.js",
    ];

    /// Write a template tree whose files contain their own relative path
    pub(crate) fn seed_templates(root: &Path) {
        for file in TEMPLATE_FILES {
            let path = root.join(file);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, file).unwrap();
        }
    }

    fn engine(input: &str) -> PromptEngine<Cursor<Vec<u8>>, Vec<u8>> {
        PromptEngine::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    async fn walk(input: &str) -> (tempfile::TempDir, WizardState, String) {
        let templates = tempfile::tempdir().unwrap();
        let project = tempfile::tempdir().unwrap();
        seed_templates(templates.path());
        let installer = TemplateInstaller::new(templates.path(), project.path());

        let mut prompter = engine(input);
        let state = run_wizard(NODES, &mut prompter, &installer, WizardState::new())
            .await
            .unwrap();
        let output = String::from_utf8(prompter.into_output()).unwrap();
        (project, state, output)
    }

    fn names(state: &WizardState, kind: DependencyKind) -> Vec<&str> {
        state.dependencies.names(kind).collect()
    }

    #[tokio::test]
    async fn test_express_with_ejs() {
        // TypeScript n, VS Code n, Express y, EJS y, Sass n
        let (project, state, output) = walk("n\nn\ny\ny\nn\n").await;
        let dir = project.path();

        assert_eq!(
            names(&state, DependencyKind::Runtime),
            ["convict", "express", "helmet", "morgan", "nodemon", "ejs"]
        );
        assert_eq!(
            state.mutations,
            [PendingMutation::script("start", "nodemon server.js")]
        );

        assert!(dir.join("config.js").is_file());
        assert!(dir.join("server.js").is_file());
        assert!(dir.join("routes/index.js").is_file());
        let routes = std::fs::read_to_string(dir.join("routes.json")).unwrap();
        assert!(routes.contains("\"route\": \"/\""));
        assert!(dir.join("views/pages/index.ejs").is_file());
        assert!(dir.join("views/partials/_header.ejs").is_file());
        assert!(dir.join("public/css/style.css").is_file());
        assert!(!dir.join(".vscode/launch.json").exists());

        assert!(!output.contains("Rollup?"));
        assert!(!output.contains("TypeDoc?"));
    }

    #[tokio::test]
    async fn test_typescript_with_rollup() {
        // TypeScript y, VS Code n, Express n, Rollup y, TypeDoc n
        let (project, state, output) = walk("y\nn\nn\ny\nn\n").await;
        let dir = project.path();

        assert!(state.mutations.contains(&PendingMutation::script(
            "build",
            "rollup --config --watch"
        )));
        assert_eq!(
            state.mutations.last(),
            Some(&PendingMutation::script("start", "ts-node index.ts"))
        );
        assert_eq!(
            names(&state, DependencyKind::Dev),
            [
                "eslint",
                "@typescript-eslint/eslint-plugin",
                "@typescript-eslint/parser",
                "@types/node",
                "rollup",
                "rollup-plugin-typescript",
                "tslib"
            ]
        );
        assert!(dir.join("rollup.config.js").is_file());
        assert!(!dir.join("server.ts").exists());
        assert!(!dir.join("config.ts").exists());
        assert!(!dir.join("routes").exists());
        assert!(!dir.join("routes.json").exists());

        assert!(!output.contains("EJS?"));
        assert!(!output.contains("Sass?"));
    }

    #[tokio::test]
    async fn test_existing_gitignore_is_kept() {
        let templates = tempfile::tempdir().unwrap();
        let project = tempfile::tempdir().unwrap();
        seed_templates(templates.path());
        std::fs::write(project.path().join(".gitignore"), "dist\n").unwrap();
        let installer = TemplateInstaller::new(templates.path(), project.path());

        let state = step(&NODES[0], WizardState::new(), &mut engine(""), &installer)
            .await
            .unwrap();

        let kept = std::fs::read_to_string(project.path().join(".gitignore")).unwrap();
        assert_eq!(kept, "dist\n");
        assert_eq!(state.copied.len(), 2);
    }

    #[tokio::test]
    async fn test_vscode_launch_config_follows_language() {
        // TypeScript n, VS Code y, Express n
        let (project, _, output) = walk("n\ny\nn\n").await;
        let launch = std::fs::read_to_string(project.path().join(".vscode/launch.json")).unwrap();
        assert_eq!(launch, "dotfiles/.vscode/js/launch.json");
        assert!(output.contains("Visual Studio Code"));
    }

    #[tokio::test]
    async fn test_missing_template_fails_the_walk() {
        let templates = tempfile::tempdir().unwrap();
        let project = tempfile::tempdir().unwrap();
        let installer = TemplateInstaller::new(templates.path(), project.path());

        let err = run_wizard(NODES, &mut engine(""), &installer, WizardState::new())
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::KerplowError::Copy { .. }));
    }
}
