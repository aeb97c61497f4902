//! Command interpreter detection for git-based file discovery

use crate::error::{KerplowError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// PATH used inside Git for Windows' bash so `git` and `file` resolve to its own tools
const GIT_BASH_PATH: &str = "/mingw64/bin:/usr/local/bin:/usr/bin:/bin";

/// A shell able to run `git ls-files`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shell {
    /// `sh` on a Unix host
    Posix,
    /// Git for Windows' bash
    GitBash(PathBuf),
    /// Windows Subsystem for Linux bash; paths need translating
    Wsl(PathBuf),
}

impl Shell {
    /// Find a usable shell on this host
    pub fn detect() -> Result<Self> {
        if cfg!(windows) {
            return detect_windows(
                std::env::var_os("ProgramW6432").map(PathBuf::from),
                std::env::var_os("windir").map(PathBuf::from),
            );
        }

        let usable = Command::new("sh")
            .args(["-c", "exit 0"])
            .status()
            .is_ok_and(|status| status.success());

        if usable {
            Ok(Shell::Posix)
        } else {
            Err(KerplowError::ShellUnavailable {
                searched: "sh".to_string(),
            })
        }
    }

    /// Run `script` with `cwd` as working directory and return its stdout
    pub fn run(&self, cwd: &Path, script: &str) -> Result<String> {
        let mut command = match self {
            Shell::Posix => {
                let mut command = Command::new("sh");
                command.arg("-c").arg(script).current_dir(cwd);
                command
            }
            Shell::GitBash(bash) => {
                let mut command = Command::new(bash);
                command
                    .arg("-c")
                    .arg(script)
                    .current_dir(cwd)
                    .env("PATH", GIT_BASH_PATH);
                command
            }
            Shell::Wsl(bash) => {
                let cwd = wsl_path(&cwd.to_string_lossy());
                let mut command = Command::new(bash);
                command
                    .arg("-c")
                    .arg(format!("cd '{}' && {}", cwd, script));
                command
            }
        };

        let output = command.output().map_err(|source| KerplowError::Spawn {
            command: script.to_string(),
            source,
        })?;

        if !output.status.success() {
            return Err(KerplowError::CommandFailed {
                command: script.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn detect_windows(program_files: Option<PathBuf>, windir: Option<PathBuf>) -> Result<Shell> {
    let git_bash = program_files.map(|dir| dir.join("Git").join("usr").join("bin").join("bash.exe"));
    let wsl_bash = windir.map(|dir| dir.join("System32").join("bash.exe"));

    if let Some(bash) = git_bash.as_ref().filter(|p| p.is_file()) {
        return Ok(Shell::GitBash(bash.clone()));
    }
    if let Some(bash) = wsl_bash.as_ref().filter(|p| p.is_file()) {
        return Ok(Shell::Wsl(bash.clone()));
    }

    let searched = [git_bash, wsl_bash]
        .into_iter()
        .flatten()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>();

    Err(KerplowError::ShellUnavailable {
        searched: if searched.is_empty() {
            "no Git bash or WSL location configured".to_string()
        } else {
            searched.join(", ")
        },
    })
}

/// Translate a Windows path (`C:\work\app`) into its WSL mount (`/mnt/c/work/app`)
pub fn wsl_path(path: &str) -> String {
    let mut chars = path.chars();
    match (chars.next(), chars.next()) {
        (Some(drive), Some(':')) if drive.is_ascii_alphabetic() => {
            let rest = path[2..].replace('\\', "/");
            let rest = rest.trim_start_matches('/');
            format!("/mnt/{}/{}", drive.to_ascii_lowercase(), rest)
        }
        _ => path.replace('\\', "/"),
    }
}
