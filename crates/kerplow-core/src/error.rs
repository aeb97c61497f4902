//! Error taxonomy for scaffolding operations

use std::path::PathBuf;
use thiserror::Error;

use crate::wizard::Topic;

/// Errors raised by the core scaffolding operations.
///
/// Everything here is fatal to the run except a failed `ManagerInvocation`
/// during self-removal, which the caller swallows.
#[derive(Debug, Error)]
pub enum KerplowError {
    /// A manifest mutation targets a path whose parent is missing or not an object
    #[error("invalid manifest path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    /// A template source is missing or could not be copied
    #[error("failed to copy template `{source_path}` to `{dest}`: {source}")]
    Copy {
        source_path: PathBuf,
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No supported command interpreter was found for retab
    #[error("no suitable shell found ({searched}). Aborting.")]
    ShellUnavailable { searched: String },

    /// The package manager exited with a non-zero status
    #[error("`{command}` failed with exit code {}", code.map_or_else(|| "unknown".to_string(), |c| c.to_string()))]
    ManagerInvocation { command: String, code: Option<i32> },

    /// A helper command (git, shell) exited with a non-zero status
    #[error("`{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    /// A child process could not be started at all
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A manifest document is not valid JSON5
    #[error("failed to parse {}: {message}", path.display())]
    ManifestParse { path: PathBuf, message: String },

    /// `template.yaml` at the template root is malformed
    #[error("failed to parse {}: {source}", path.display())]
    TemplateManifest {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The wizard definition asks the same topic twice
    #[error("question `{0}` was already answered in this run")]
    QuestionAskedTwice(Topic),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl KerplowError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Exit code to hand back to the shell when this error ends the run
    pub fn exit_code(&self) -> i32 {
        match self {
            KerplowError::ManagerInvocation {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

pub type Result<T, E = KerplowError> = std::result::Result<T, E>;
