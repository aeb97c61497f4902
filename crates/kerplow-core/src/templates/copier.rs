//! Template file copying into the target project

use crate::error::{KerplowError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// One file to copy, both paths relative to their roots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateCopyJob {
    pub source: PathBuf,
    pub dest: PathBuf,
}

impl TemplateCopyJob {
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
        }
    }

    /// Copy a file to the same relative location in the project
    pub fn mirrored(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            source: path.clone(),
            dest: path,
        }
    }
}

/// Copies templates from the packaged template tree into a project
#[derive(Debug, Clone)]
pub struct TemplateInstaller {
    source_root: PathBuf,
    target_root: PathBuf,
}

impl TemplateInstaller {
    pub fn new(source_root: impl Into<PathBuf>, target_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            target_root: target_root.into(),
        }
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn target_root(&self) -> &Path {
        &self.target_root
    }

    /// Copy a template, overwriting whatever is at the destination
    pub async fn copy(&self, job: &TemplateCopyJob) -> Result<PathBuf> {
        let source = self.source_root.join(&job.source);
        let dest = self.target_root.join(&job.dest);
        copy_file(&source, &dest).await?;
        Ok(dest)
    }

    /// Copy a template only when the destination does not exist yet
    pub async fn copy_if_absent(&self, job: &TemplateCopyJob) -> Result<Option<PathBuf>> {
        let dest = self.target_root.join(&job.dest);
        let exists = fs::try_exists(&dest)
            .await
            .map_err(|e| KerplowError::io(format!("Failed to check {}", dest.display()), e))?;
        if exists {
            return Ok(None);
        }
        self.copy(job).await.map(Some)
    }

    /// Create an (empty) directory in the project
    pub async fn create_dir(&self, relative: &Path) -> Result<PathBuf> {
        let dir = self.target_root.join(relative);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| KerplowError::io(format!("Failed to create directory: {}", dir.display()), e))?;
        Ok(dir)
    }
}

/// Copy raw bytes from `source` to `dest`, creating `dest`'s parents first
pub async fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).await.map_err(|e| {
            KerplowError::io(format!("Failed to create directory: {}", parent.display()), e)
        })?;
    }

    fs::copy(source, dest)
        .await
        .map_err(|e| KerplowError::Copy {
            source_path: source.to_path_buf(),
            dest: dest.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
