//! Template installation
//!
//! This module provides:
//! - Copy jobs from the packaged template tree into a project
//! - The optional root manifest (`template.yaml`) listing shared config files
//! - Route manifest generation for the Express templates

pub mod copier;
pub mod manifest;
pub mod routes;

pub use copier::{copy_file, TemplateCopyJob, TemplateInstaller};
pub use manifest::{RootManifest, SharedFile};
pub use routes::{
    discover_routes, render_routes, write_route_manifest, RouteModule, ROUTE_MANIFEST,
};
