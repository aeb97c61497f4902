//! Template tree manifest (template.yaml at the template root)

use crate::error::{KerplowError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name of the optional manifest at the template root
pub const ROOT_MANIFEST: &str = "template.yaml";

/// Config files kept in sync by `--update` when the manifest does not list any
const DEFAULT_SHARED_FILES: &[&str] = &[
    ".eslintrc.json",
    "tsconfig.json",
    ".vscode/extensions.json",
    ".vscode/settings.json",
];

/// A config file that update mode refreshes in existing projects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedFile {
    /// Source path relative to the template root
    pub source: String,

    /// Destination path in each project (defaults to source if not specified)
    #[serde(default)]
    pub dest: Option<String>,
}

impl SharedFile {
    /// Get the destination path (falls back to source if dest not specified)
    pub fn destination(&self) -> &str {
        self.dest.as_deref().unwrap_or(&self.source)
    }
}

/// Root manifest of the template tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootManifest {
    #[serde(default = "default_shared_files")]
    pub shared_files: Vec<SharedFile>,
}

fn default_shared_files() -> Vec<SharedFile> {
    DEFAULT_SHARED_FILES
        .iter()
        .map(|path| SharedFile {
            source: (*path).to_string(),
            dest: None,
        })
        .collect()
}

impl Default for RootManifest {
    fn default() -> Self {
        Self {
            shared_files: default_shared_files(),
        }
    }
}

impl RootManifest {
    /// Read `template.yaml` from the template root, or use the defaults if absent
    pub fn load(template_root: &Path) -> Result<Self> {
        let path = template_root.join(ROOT_MANIFEST);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(KerplowError::io(
                    format!("Failed to read {}", path.display()),
                    e,
                ))
            }
        };

        serde_yaml::from_str(&content).map_err(|source| KerplowError::TemplateManifest { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_manifest_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = RootManifest::load(dir.path()).unwrap();
        let dests: Vec<&str> = manifest.shared_files.iter().map(SharedFile::destination).collect();
        assert_eq!(dests, DEFAULT_SHARED_FILES);
    }

    #[test]
    fn test_shared_files_with_rename() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(ROOT_MANIFEST),
            "shared_files:\n  - source: eslintrc.base.json\n    dest: .eslintrc.json\n  - source: tsconfig.json\n",
        )
        .unwrap();

        let manifest = RootManifest::load(dir.path()).unwrap();
        assert_eq!(manifest.shared_files.len(), 2);
        assert_eq!(manifest.shared_files[0].destination(), ".eslintrc.json");
        assert_eq!(manifest.shared_files[1].destination(), "tsconfig.json");
    }

    #[test]
    fn test_empty_manifest_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ROOT_MANIFEST), "{}\n").unwrap();
        let manifest = RootManifest::load(dir.path()).unwrap();
        assert_eq!(manifest, RootManifest::default());
    }

    #[test]
    fn test_malformed_manifest_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ROOT_MANIFEST), "shared_files: [oops").unwrap();
        let err = RootManifest::load(dir.path()).unwrap_err();
        assert!(matches!(err, KerplowError::TemplateManifest { .. }));
    }
}
