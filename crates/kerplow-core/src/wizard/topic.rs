//! The tools the wizard asks about

use crate::prompt::{Blurb, Question};
use std::fmt;

/// One question in the wizard; also the question's identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Topic {
    TypeScript,
    VsCode,
    Express,
    Ejs,
    Sass,
    Rollup,
    TypeDoc,
}

impl Topic {
    pub fn display_name(&self) -> &'static str {
        self.blurb().title
    }

    pub fn question(&self) -> Question {
        match self {
            Topic::TypeScript => Question::new("TypeScript?"),
            Topic::VsCode => Question::new("VS Code?"),
            Topic::Express => Question::new("Express?"),
            Topic::Ejs => Question::new("EJS?"),
            Topic::Sass => Question::new("Sass?"),
            Topic::Rollup => Question::new("Rollup?"),
            Topic::TypeDoc => Question::new("TypeDoc?"),
        }
    }

    pub fn blurb(&self) -> &'static Blurb {
        match self {
            Topic::TypeScript => &TYPESCRIPT,
            Topic::VsCode => &VSCODE,
            Topic::Express => &EXPRESS,
            Topic::Ejs => &EJS,
            Topic::Sass => &SASS,
            Topic::Rollup => &ROLLUP,
            Topic::TypeDoc => &TYPEDOC,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

const TYPESCRIPT: Blurb = Blurb {
    title: "TypeScript",
    summary: "A strict syntactical superset of JavaScript that adds optional\nstatic typing to the language.",
    pros: &["Compile time type checking", "Great tooling"],
    cons: &["Another compiler between you and your code"],
};

const VSCODE: Blurb = Blurb {
    title: "Visual Studio Code",
    summary: "A code editor with debugging, source control, and IDE-like code\nnavigation and project management.",
    pros: &[
        "IntelliSense",
        "Launch configurations for debugging out of the box",
        "Extensible",
    ],
    cons: &["Will be confused with Visual Studio"],
};

const EXPRESS: Blurb = Blurb {
    title: "Express",
    summary: "A web application framework for Node.js.",
    pros: &["De facto standard server framework for Node.js"],
    cons: &[
        "\"Middleware\" can be a confusing concept for beginners",
        "Adds boilerplate",
    ],
};

const EJS: Blurb = Blurb {
    title: "EJS",
    summary: "Embedded JavaScript templates.",
    pros: &["De facto standard Node.js templating"],
    cons: &[],
};

const SASS: Blurb = Blurb {
    title: "Sass",
    summary: "A CSS pre-processor and CSS superset (SCSS) that makes writing CSS\neasier.",
    pros: &["Nesting", "Variables", "Inheritance"],
    cons: &["Adds a compilation step"],
};

const ROLLUP: Blurb = Blurb {
    title: "Rollup",
    summary: "A module bundler for JavaScript.",
    pros: &["Tree-shaking", "Plugin support", "Minimal configuration"],
    cons: &["Adds a compilation step"],
};

const TYPEDOC: Blurb = Blurb {
    title: "TypeDoc",
    summary: "A documentation generator for TypeScript projects.",
    pros: &["Works without configuration"],
    cons: &[],
};
