//! The fixed sequence of wizard nodes
//!
//! Nodes run in declaration order. A topic node is skipped when its
//! precondition on earlier answers is false; an apply node always runs.

use super::state::{Answers, Effect, Effects};
use super::Topic;
use crate::manifest::PendingMutation;
use crate::runtime::DependencyKind::{Dev, Runtime};
use crate::templates::{TemplateCopyJob, ROUTE_MANIFEST};
use std::path::PathBuf;

/// What a node wants to do given the answers so far
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// Precondition failed; the question is not asked
    Skip,
    Ask {
        topic: Topic,
        on_yes: Effects,
        on_no: Effects,
    },
    /// No question; effects always apply
    Apply(Effects),
}

type EffectsFn = fn(&Answers) -> Effects;

#[derive(Clone, Copy)]
enum NodeKind {
    Ask {
        topic: Topic,
        precondition: fn(&Answers) -> bool,
        on_yes: EffectsFn,
        on_no: EffectsFn,
    },
    Apply(EffectsFn),
}

/// One step of the wizard
#[derive(Clone, Copy)]
pub struct Node {
    pub name: &'static str,
    kind: NodeKind,
}

impl Node {
    pub fn evaluate(&self, answers: &Answers) -> Evaluation {
        match self.kind {
            NodeKind::Ask {
                topic,
                precondition,
                on_yes,
                on_no,
            } => {
                if precondition(answers) {
                    Evaluation::Ask {
                        topic,
                        on_yes: on_yes(answers),
                        on_no: on_no(answers),
                    }
                } else {
                    Evaluation::Skip
                }
            }
            NodeKind::Apply(effects) => Evaluation::Apply(effects(answers)),
        }
    }

    pub fn topic(&self) -> Option<Topic> {
        match self.kind {
            NodeKind::Ask { topic, .. } => Some(topic),
            NodeKind::Apply(_) => None,
        }
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("topic", &self.topic())
            .finish()
    }
}

const fn ask(
    topic: Topic,
    precondition: fn(&Answers) -> bool,
    on_yes: EffectsFn,
) -> Node {
    Node {
        name: topic_node_name(topic),
        kind: NodeKind::Ask {
            topic,
            precondition,
            on_yes,
            on_no: nothing,
        },
    }
}

const fn topic_node_name(topic: Topic) -> &'static str {
    match topic {
        Topic::TypeScript => "typescript",
        Topic::VsCode => "vscode",
        Topic::Express => "express",
        Topic::Ejs => "ejs",
        Topic::Sass => "sass",
        Topic::Rollup => "rollup",
        Topic::TypeDoc => "typedoc",
    }
}

/// The wizard, in order
pub const NODES: &[Node] = &[
    Node {
        name: "prelude",
        kind: NodeKind::Apply(prelude),
    },
    ask(Topic::TypeScript, always, typescript),
    ask(Topic::VsCode, always, vscode),
    ask(Topic::Express, always, express),
    ask(Topic::Ejs, with_express, ejs),
    ask(Topic::Sass, with_express, sass),
    ask(Topic::Rollup, typescript_without_express, rollup),
    ask(Topic::TypeDoc, typescript_without_express, typedoc),
    Node {
        name: "finish",
        kind: NodeKind::Apply(finish),
    },
];

fn always(_: &Answers) -> bool {
    true
}

fn with_express(answers: &Answers) -> bool {
    answers.is_yes(Topic::Express)
}

fn typescript_without_express(answers: &Answers) -> bool {
    answers.is_yes(Topic::TypeScript) && !answers.is_yes(Topic::Express)
}

fn nothing(_: &Answers) -> Effects {
    Vec::new()
}

/// Source directory for a language flavour of the templates
fn flavour(answers: &Answers) -> &'static str {
    if answers.is_yes(Topic::TypeScript) {
        "ts"
    } else {
        "js"
    }
}

fn copy(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Effect {
    Effect::Copy(TemplateCopyJob::new(source, dest))
}

fn launch_config(source_dir: &str) -> Effect {
    copy(
        format!("dotfiles/.vscode/{}/launch.json", source_dir),
        ".vscode/launch.json",
    )
}

fn prelude(_: &Answers) -> Effects {
    let mut effects = vec![
        Effect::Copy(TemplateCopyJob::mirrored(".eslintrc.json")),
        Effect::Copy(TemplateCopyJob::mirrored("tsconfig.json")),
        Effect::CopyIfAbsent(TemplateCopyJob::mirrored(".gitignore")),
    ];
    effects.extend(
        [
            "eslint",
            "@typescript-eslint/eslint-plugin",
            "@typescript-eslint/parser",
            "typescript",
        ]
        .into_iter()
        .map(|name| Effect::AddDependency(Dev, name)),
    );
    effects
}

fn typescript(_: &Answers) -> Effects {
    vec![
        Effect::AddDependency(Runtime, "typescript"),
        Effect::AddDependency(Runtime, "ts-node"),
        // the compiler is now a runtime dependency
        Effect::RemoveDependency(Dev, "typescript"),
        Effect::AddDependency(Dev, "@types/node"),
    ]
}

fn vscode(_: &Answers) -> Effects {
    vec![
        Effect::Copy(TemplateCopyJob::mirrored(".vscode/extensions.json")),
        Effect::Copy(TemplateCopyJob::mirrored(".vscode/settings.json")),
    ]
}

fn express(answers: &Answers) -> Effects {
    let ext = flavour(answers);

    let mut effects: Effects = ["convict", "express", "helmet", "morgan", "nodemon"]
        .into_iter()
        .map(|name| Effect::AddDependency(Runtime, name))
        .collect();

    if answers.is_yes(Topic::TypeScript) {
        effects.extend(
            [
                "@types/convict",
                "@types/express",
                "@types/helmet",
                "@types/morgan",
            ]
            .into_iter()
            .map(|name| Effect::AddDependency(Dev, name)),
        );
    }

    effects.push(Effect::CreateDir(PathBuf::from("public")));
    effects.push(Effect::CreateDir(PathBuf::from("routes")));

    for file in ["config", "server", "routes/index"] {
        effects.push(copy(
            format!("dotfiles/express/{ext}/{file}.{ext}"),
            format!("{file}.{ext}"),
        ));
    }

    // The server binds whatever routes.json lists
    effects.push(Effect::WriteRoutes {
        routes_dir: PathBuf::from("routes"),
        manifest: PathBuf::from(ROUTE_MANIFEST),
    });

    if answers.is_yes(Topic::VsCode) {
        effects.push(launch_config(&format!("express/{}", ext)));
    }

    effects
}

/// Static assets and views installed with EJS, relative to `dotfiles/express`
const EJS_FILES: &[&str] = &[
    "public/css/style.css",
    "public/css/lib/baseline.css",
    "public/images/image01.jpg",
    "public/images/image02.jpg",
    "public/js/main.js",
    "views/pages/index.ejs",
    "views/partials/_header.ejs",
    "views/partials/_footer.ejs",
];

fn ejs(answers: &Answers) -> Effects {
    let mut effects = vec![Effect::AddDependency(Runtime, "ejs")];
    if answers.is_yes(Topic::TypeScript) {
        effects.push(Effect::AddDependency(Dev, "@types/ejs"));
    }
    effects.extend(
        EJS_FILES
            .iter()
            .map(|file| copy(format!("dotfiles/express/{}", file), *file)),
    );
    effects
}

fn sass(_: &Answers) -> Effects {
    vec![Effect::Mutate(PendingMutation::script(
        "sassc",
        "sass --watch public/css/style.scss:public/css/style.css --no-source-map",
    ))]
}

fn rollup(_: &Answers) -> Effects {
    vec![
        Effect::AddDependency(Dev, "rollup"),
        Effect::AddDependency(Dev, "rollup-plugin-typescript"),
        Effect::AddDependency(Dev, "tslib"),
        copy("dotfiles/rollup.config.js", "rollup.config.js"),
        Effect::Mutate(PendingMutation::script("build", "rollup --config --watch")),
    ]
}

fn typedoc(_: &Answers) -> Effects {
    vec![
        Effect::AddDependency(Runtime, "typedoc"),
        Effect::Mutate(PendingMutation::script(
            "typedoc",
            "typedoc --mode file . --out docs --exclude **/node_modules/** --module ES2015 --moduleResolution Node",
        )),
    ]
}

/// Start script and editor launch config, which depend on the whole walk
fn finish(answers: &Answers) -> Effects {
    let typescript = answers.is_yes(Topic::TypeScript);
    let express = answers.is_yes(Topic::Express);

    let start = match (express, typescript) {
        (true, true) => "nodemon --watch \"**/*.ts\" --exec ts-node server.ts",
        (true, false) => "nodemon server.js",
        (false, true) => "ts-node index.ts",
        (false, false) => "node index.js",
    };

    let mut effects = vec![Effect::Mutate(PendingMutation::script("start", start))];

    // Express projects got their launch config with the server files
    if !express && answers.is_yes(Topic::VsCode) {
        effects.push(launch_config(flavour(answers)));
    }

    effects
}
