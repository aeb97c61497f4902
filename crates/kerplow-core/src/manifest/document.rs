//! Reading and writing manifest documents (package.json, package-lock.json)

use super::mutation::{apply_mutation, PendingMutation};
use crate::error::{KerplowError, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// A manifest loaded into memory, edited in place and written back whole
#[derive(Debug, Clone)]
pub struct ManifestDocument {
    path: PathBuf,
    root: Value,
}

impl ManifestDocument {
    /// Read and parse a manifest. Comments and trailing commas are accepted
    /// because these files are edited by hand.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let text = std::fs::read_to_string(&path)
            .map_err(|e| KerplowError::io(format!("Failed to read {}", path.display()), e))?;
        let root = parse(&text).map_err(|message| KerplowError::ManifestParse {
            path: path.clone(),
            message,
        })?;
        Ok(Self { path, root })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn value(&self) -> &Value {
        &self.root
    }

    pub fn apply(&mut self, mutation: &PendingMutation) -> Result<()> {
        apply_mutation(&mut self.root, mutation)
    }

    /// Apply mutations in queue order
    pub fn apply_all<'a>(
        &mut self,
        mutations: impl IntoIterator<Item = &'a PendingMutation>,
    ) -> Result<()> {
        for mutation in mutations {
            self.apply(mutation)?;
        }
        Ok(())
    }

    pub fn to_pretty_string(&self) -> String {
        render(&self.root)
    }

    pub fn save(&self) -> Result<()> {
        std::fs::write(&self.path, self.to_pretty_string())
            .map_err(|e| KerplowError::io(format!("Failed to write {}", self.path.display()), e))
    }
}

/// Parse JSON5 text into a JSON value, keeping key order
pub fn parse(text: &str) -> std::result::Result<Value, String> {
    json5::from_str(text).map_err(|e| e.to_string())
}

/// Serialize with 2-space indentation and a trailing newline
pub fn render(value: &Value) -> String {
    let mut out = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    out.push('\n');
    out
}

/// Load a manifest, apply mutations and write it back.
/// Does nothing when there are no mutations.
pub fn edit_file(path: &Path, mutations: &[PendingMutation]) -> Result<()> {
    if mutations.is_empty() {
        return Ok(());
    }
    let mut document = ManifestDocument::load(path)?;
    document.apply_all(mutations)?;
    document.save()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::mutation::ManifestPath;

    const PACKAGE: &str = r#"{
  "name": "demo",
  "version": "1.0.0",
  "description": "",
  "main": "index.js",
  "scripts": {
    "test": "echo \"Error: no test specified\" && exit 1"
  },
  "keywords": [],
  "author": "",
  "license": "ISC",
  "dependencies": {
    "kerplow": "^0.4.0"
  }
}
"#;

    #[test]
    fn test_untouched_round_trip_is_byte_identical() {
        let value = parse(PACKAGE).unwrap();
        assert_eq!(render(&value), PACKAGE);
    }

    #[test]
    fn test_round_trip_normalizes_indentation_only() {
        let text = "{\n\t\"z\": 1,\n\t\"a\": {\"b\": [true, null]}\n}";
        let value = parse(text).unwrap();
        assert_eq!(
            render(&value),
            "{\n  \"z\": 1,\n  \"a\": {\n    \"b\": [\n      true,\n      null\n    ]\n  }\n}\n"
        );
    }

    #[test]
    fn test_accepts_comments_and_trailing_commas() {
        let text = r#"{
  // project name
  "name": "demo",
  "scripts": {
    "test": "jest", /* runner */
  },
}"#;
        let value = parse(text).unwrap();
        assert_eq!(value["name"], "demo");
        assert_eq!(value["scripts"]["test"], "jest");
        assert!(!render(&value).contains("//"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse("{ name: ").is_err());
    }

    #[test]
    fn test_edit_file_applies_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(&path, PACKAGE).unwrap();

        edit_file(
            &path,
            &[
                PendingMutation::script("start", "node index.js"),
                PendingMutation::delete(ManifestPath::new(["dependencies", "kerplow"])),
                PendingMutation::script("start", "nodemon server.js"),
            ],
        )
        .unwrap();

        let doc = ManifestDocument::load(&path).unwrap();
        assert_eq!(doc.value()["scripts"]["start"], "nodemon server.js");
        assert_eq!(doc.value()["dependencies"], serde_json::json!({}));
        assert_eq!(doc.value()["license"], "ISC");
    }

    #[test]
    fn test_load_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(&path, "{ oops").unwrap();

        let err = ManifestDocument::load(&path).unwrap_err();
        assert!(matches!(err, KerplowError::ManifestParse { .. }));
        assert!(err.to_string().contains("package.json"));
    }
}
