//! Kerplow Core - interactive scaffolding for Node.js projects
//!
//! Asks a fixed sequence of yes/no questions about the tooling a project
//! should use, copies the matching template files, edits `package.json`,
//! installs the chosen packages and finally removes itself from the project.
//! An update mode refreshes the shared config files in existing projects.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - prompting, manifest editing, template copying,
//!   package manager invocation
//! - **Layer 2: Workflow Orchestration** - the wizard node graph, `scaffold` and the
//!   update/retab driver, all UI-free and driven through the `Prompter` and
//!   `CommandRunner` traits
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based narration (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based run module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use kerplow_core::{scaffold, PromptEngine, ScaffoldOptions, SystemRunner};
//!
//! let stdin = std::io::stdin();
//! let mut prompter = PromptEngine::new(stdin.lock(), std::io::stdout());
//! let outcome = scaffold(&options, &mut prompter, &mut SystemRunner).await?;
//! ```

pub mod error;
pub mod manifest;
pub mod product;
pub mod prompt;
pub mod runtime;
pub mod scaffold;
pub mod sync;
pub mod templates;
pub mod wizard;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{KerplowError, Result};
pub use manifest::{ManifestDocument, ManifestPath, PendingMutation};
pub use product::ProductConfig;
pub use prompt::{PromptEngine, Prompter, Question};
pub use runtime::{check_runtimes, CommandRunner, RuntimeInfo, SystemRunner};
pub use scaffold::{scaffold, ScaffoldOptions, ScaffoldOutcome};
pub use templates::{discover_routes, render_routes, RootManifest, RouteModule};
pub use wizard::{Topic, WizardState};

#[cfg(feature = "tui")]
pub use tui::{run, RunArgs, RunOutcome};
