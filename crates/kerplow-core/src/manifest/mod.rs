//! Manifest editing
//!
//! - Path-addressed `Set`/`Delete` mutations with last-write-wins ordering
//! - JSON5-tolerant loading, order-preserving 2-space output

pub mod document;
pub mod mutation;

pub use document::{edit_file, ManifestDocument};
pub use mutation::{apply_mutation, ManifestPath, Operation, PendingMutation};

/// The project manifest edited by the wizard
pub const PACKAGE_JSON: &str = "package.json";

/// The lockfile that also names the tool after installation
pub const PACKAGE_LOCK_JSON: &str = "package-lock.json";
