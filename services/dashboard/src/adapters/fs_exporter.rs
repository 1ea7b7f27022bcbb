//! services/dashboard/src/adapters/fs_exporter.rs
//!
//! Implements the `DocumentExporter` port by writing exports into a directory
//! on the host, standing in for a browser download.

use async_trait::async_trait;
use legalvision_core::ports::{DocumentExporter, PortError, PortResult};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Clone)]
pub struct FsExporter {
    dir: PathBuf,
}

impl FsExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl DocumentExporter for FsExporter {
    async fn export(&self, file_name: &str, contents: &[u8]) -> PortResult<String> {
        // Only the final component is honoured; exports never escape `dir`.
        let name = Path::new(file_name)
            .file_name()
            .ok_or_else(|| PortError::Unexpected(format!("invalid export name '{}'", file_name)))?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| PortError::Unavailable(format!("{}: {}", self.dir.display(), e)))?;

        let target = self.dir.join(name);
        tokio::fs::write(&target, contents)
            .await
            .map_err(|e| PortError::Unavailable(format!("{}: {}", target.display(), e)))?;

        info!("Exported {} bytes to {}", contents.len(), target.display());
        Ok(target.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_into_the_export_directory_only() {
        let dir = tempfile::tempdir().expect("tempdir");
        let exports = dir.path().join("exports");
        let exporter = FsExporter::new(&exports);

        let location = exporter.export("../../escape.json", b"{}").await.unwrap();
        let written = PathBuf::from(&location);
        assert_eq!(written.parent(), Some(exports.as_path()));
        assert_eq!(tokio::fs::read(&written).await.unwrap(), b"{}");
    }

    #[tokio::test]
    async fn unwritable_directory_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("file");
        tokio::fs::write(&blocker, b"x").await.unwrap();

        let exporter = FsExporter::new(blocker.join("exports"));
        let err = exporter.export("summary.txt", b"text").await.unwrap_err();
        assert!(matches!(err, PortError::Unavailable(_)));
    }
}
