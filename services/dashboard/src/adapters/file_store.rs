//! services/dashboard/src/adapters/file_store.rs
//!
//! A file-backed implementation of the `SessionStorage` port. The file holds a
//! flat JSON object of string keys to string values, so the session survives
//! a process restart the way browser local storage survives a reload.

use async_trait::async_trait;
use legalvision_core::ports::{PortError, PortResult, SessionStorage};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::warn;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

pub struct FileSessionStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileSessionStorage {
    /// Opens the store at `path`, creating the parent directory if needed.
    /// The file itself is created lazily on the first write.
    pub async fn open(path: impl Into<PathBuf>) -> PortResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PortError::Unexpected(format!("{}: {}", parent.display(), e)))?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_raw(&self) -> PortResult<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PortError::Unexpected(e.to_string())),
        }
    }

    async fn read_entries(&self) -> PortResult<BTreeMap<String, String>> {
        let Some(raw) = self.read_raw().await? else {
            return Ok(BTreeMap::new());
        };
        serde_json::from_str(&raw).map_err(|e| {
            PortError::Unexpected(format!("corrupt store {}: {}", self.path.display(), e))
        })
    }

    /// Like `read_entries`, but a corrupt file is replaced rather than blocking writes.
    async fn read_entries_for_write(&self) -> PortResult<BTreeMap<String, String>> {
        let Some(raw) = self.read_raw().await? else {
            return Ok(BTreeMap::new());
        };
        Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Discarding unreadable session store {}: {}", self.path.display(), e);
            BTreeMap::new()
        }))
    }

    async fn write_entries(&self, entries: &BTreeMap<String, String>) -> PortResult<()> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        // Write to a sibling file first so a crash never leaves half a record.
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }
}

//=========================================================================================
// `SessionStorage` Trait Implementation
//=========================================================================================

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn get(&self, key: &str) -> PortResult<Option<String>> {
        Ok(self.read_entries().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> PortResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries_for_write().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries).await
    }

    async fn remove(&self, key: &str) -> PortResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries_for_write().await?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries).await?;
        }
        Ok(())
    }
}
