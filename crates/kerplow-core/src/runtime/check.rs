//! Runtime detection for Node.js and the package manager

use anyhow::Result;
use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Check whether `program --version` runs successfully
pub fn check_program(program: &str, name: &'static str) -> RuntimeInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    check_program("node", "Node.js")
}

/// Check the runtimes a scaffold run needs; fails if the package manager is missing.
/// Node.js itself is reported but not required, the package manager will complain
/// on its own if it cannot run.
pub fn check_runtimes(package_manager: &str) -> Result<Vec<RuntimeInfo>> {
    let manager = check_program(package_manager, "npm");
    if !manager.available {
        anyhow::bail!(
            "Missing required runtimes:\n  - {} (install Node.js from https://nodejs.org)",
            package_manager
        );
    }

    Ok(vec![check_node(), manager])
}
