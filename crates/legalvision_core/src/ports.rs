//! crates/legalvision_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the dashboard core.
//! These traits form the boundary of the hexagonal architecture: storage,
//! notifications, navigation and the platform conveniences are supplied by
//! the hosting shell.

use async_trait::async_trait;
use serde::Serialize;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Platform capability unavailable: {0}")]
    Unavailable(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Notification and Navigation Payloads
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Default,
    Destructive,
}

/// A user-visible outcome. The core never renders these itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Single-string key/value storage persisted across reloads.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn get(&self, key: &str) -> PortResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> PortResult<()>;
    async fn remove(&self, key: &str) -> PortResult<()>;
}

/// Fire-and-forget user notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Fire-and-forget view transitions.
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, path: &str);
}

#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Places `content` on the user's clipboard.
    async fn write_text(&self, content: &str) -> PortResult<()>;
}

#[async_trait]
pub trait DocumentExporter: Send + Sync {
    /// Delivers an exported file and returns where it ended up.
    async fn export(&self, file_name: &str, contents: &[u8]) -> PortResult<String>;
}
