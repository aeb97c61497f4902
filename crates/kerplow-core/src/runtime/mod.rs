//! Runtime checks and external processes
//!
//! This module provides:
//! - Package manager detection
//! - Package manager invocation and the dependency installer
//! - The self-removal step run at the end of a scaffold
//! - Shell detection for git-based file discovery

pub mod check;
pub mod package_manager;
pub mod self_removal;
pub mod shell;

pub use check::{check_runtimes, RuntimeInfo};
pub use package_manager::{
    CommandRunner, DependencyInstaller, DependencyKind, DependencySet, EmptySetPolicy, Invocation,
    PackageManager, SystemRunner,
};
pub use self_removal::{remove_self, SelfRemovalReport};
pub use shell::Shell;
