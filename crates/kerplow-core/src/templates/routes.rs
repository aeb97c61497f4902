//! Route manifest generation for the Express templates
//!
//! Instead of importing every file under `routes/` at server start, the
//! route modules are listed once, in a fixed order, and the list is emitted
//! as a registration manifest.

use crate::error::{KerplowError, Result};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Extensions treated as route modules
pub const ROUTE_EXTENSIONS: &[&str] = &["ts", "js"];

/// File the Express server templates read their route list from
pub const ROUTE_MANIFEST: &str = "routes.json";

/// A route module and the URL path it binds to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteModule {
    pub file: PathBuf,
    pub route: String,
}

/// Walk `routes_dir` depth-first and list its route modules.
///
/// Directories are visited before their contents and siblings are sorted
/// by file name, so the output does not depend on the filesystem's listing
/// order.
pub fn discover_routes(routes_dir: &Path) -> Result<Vec<RouteModule>> {
    let mut routes = Vec::new();

    for entry in WalkDir::new(routes_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let context = format!("Failed to read {}", routes_dir.display());
            KerplowError::io(context, e.into())
        })?;

        if !entry.file_type().is_file() || !is_route_module(entry.path()) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(routes_dir)
            .unwrap_or(entry.path())
            .to_path_buf();

        routes.push(RouteModule {
            route: route_for(&relative),
            file: relative,
        });
    }

    Ok(routes)
}

/// Route list as pretty-printed JSON with a trailing newline
pub fn render_routes(routes: &[RouteModule]) -> Result<String> {
    let mut json = serde_json::to_string_pretty(routes)
        .map_err(|e| KerplowError::io("Failed to serialize route list", e.into()))?;
    json.push('\n');
    Ok(json)
}

/// Discover the modules under `routes_dir` and write their list to `manifest`
pub async fn write_route_manifest(routes_dir: &Path, manifest: &Path) -> Result<Vec<RouteModule>> {
    let routes = discover_routes(routes_dir)?;
    tokio::fs::write(manifest, render_routes(&routes)?)
        .await
        .map_err(|e| KerplowError::io(format!("Failed to write {}", manifest.display()), e))?;
    Ok(routes)
}

fn is_route_module(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ROUTE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// URL path for a module path relative to the routes root.
/// `index` modules bind to their directory.
pub fn route_for(relative: &Path) -> String {
    let mut segments: Vec<String> = relative
        .parent()
        .map(|dir| {
            dir.components()
                .filter_map(|c| match c {
                    Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    if let Some(stem) = relative.file_stem().map(|s| s.to_string_lossy()) {
        if stem != "index" {
            segments.push(stem.into_owned());
        }
    }

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "export function get() {}\n").unwrap();
    }

    #[test]
    fn test_route_names() {
        assert_eq!(route_for(Path::new("index.ts")), "/");
        assert_eq!(route_for(Path::new("about.ts")), "/about");
        assert_eq!(route_for(Path::new("users/index.js")), "/users");
        assert_eq!(route_for(Path::new("users/profile.ts")), "/users/profile");
    }

    #[test]
    fn test_discovery_is_sorted_and_depth_first() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "zeta.ts");
        touch(dir.path(), "api/v1/status.ts");
        touch(dir.path(), "api/index.ts");
        touch(dir.path(), "index.ts");
        touch(dir.path(), "README.md");

        let routes: Vec<String> = discover_routes(dir.path())
            .unwrap()
            .into_iter()
            .map(|r| r.route)
            .collect();

        assert_eq!(routes, ["/api", "/api/v1/status", "/", "/zeta"]);
    }

    #[tokio::test]
    async fn test_manifest_lists_routes_for_the_server() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("routes"), "index.js");
        touch(&dir.path().join("routes"), "users/profile.js");
        let manifest = dir.path().join(ROUTE_MANIFEST);

        write_route_manifest(&dir.path().join("routes"), &manifest)
            .await
            .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&manifest).unwrap()).unwrap();
        assert_eq!(
            written,
            serde_json::json!([
                { "file": "index.js", "route": "/" },
                { "file": "users/profile.js", "route": "/users/profile" },
            ])
        );
    }

    #[test]
    fn test_shipped_servers_bind_from_the_manifest() {
        let express = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../templates/dotfiles/express");
        for server in ["ts/server.ts", "js/server.js"] {
            let source = std::fs::read_to_string(express.join(server)).unwrap();
            assert!(source.contains(ROUTE_MANIFEST), "{server}");
            // factory handlers return their own path and middleware
            assert!(source.contains("...middleware, callback"), "{server}");
        }
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_routes(&dir.path().join("routes")).is_err());
    }
}
