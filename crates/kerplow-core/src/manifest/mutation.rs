//! Point mutations on a manifest document

use crate::error::{KerplowError, Result};
use serde_json::Value;
use std::fmt;

/// Location of a value inside a manifest, e.g. `scripts.start`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManifestPath(Vec<String>);

impl ManifestPath {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    pub fn keys(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ManifestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Set(Value),
    Delete,
}

/// A queued manifest edit
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMutation {
    pub path: ManifestPath,
    pub operation: Operation,
}

impl PendingMutation {
    pub fn set(path: ManifestPath, value: impl Into<Value>) -> Self {
        Self {
            path,
            operation: Operation::Set(value.into()),
        }
    }

    pub fn delete(path: ManifestPath) -> Self {
        Self {
            path,
            operation: Operation::Delete,
        }
    }

    /// Shorthand for `scripts.<name> = <command>`
    pub fn script(name: &str, command: &str) -> Self {
        Self::set(ManifestPath::new(["scripts", name]), command)
    }
}

/// Apply one mutation to a parsed document.
///
/// Every key but the last must resolve to an object. For `Set` the parents
/// must exist; for `Delete` a missing parent or key means there is nothing to
/// remove.
pub fn apply_mutation(document: &mut Value, mutation: &PendingMutation) -> Result<()> {
    let path = &mutation.path;
    let is_delete = matches!(mutation.operation, Operation::Delete);

    let invalid = |reason: String| KerplowError::InvalidPath {
        path: path.to_string(),
        reason,
    };

    let (last, parents) = path
        .keys()
        .split_last()
        .ok_or_else(|| invalid("path is empty".to_string()))?;

    let mut cursor = document;
    for key in parents {
        let object = cursor
            .as_object_mut()
            .ok_or_else(|| invalid(format!("parent of `{}` is not an object", key)))?;

        cursor = match object.get_mut(key) {
            Some(value) => value,
            None if is_delete => return Ok(()),
            None => return Err(invalid(format!("`{}` does not exist", key))),
        };
    }

    let object = cursor
        .as_object_mut()
        .ok_or_else(|| invalid(format!("parent of `{}` is not an object", last)))?;

    match &mutation.operation {
        Operation::Set(value) => {
            object.insert(last.clone(), value.clone());
        }
        Operation::Delete => {
            // shift_remove keeps the order of the remaining keys
            object.shift_remove(last);
        }
    }

    Ok(())
}
