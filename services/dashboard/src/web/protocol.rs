//! services/dashboard/src/web/protocol.rs
//!
//! Defines the WebSocket message protocol between the analyzer view in the
//! browser and the dashboard service.

use legalvision_core::{
    domain::{AnalysisResult, FileHandle, PipelineSnapshot, StepStatus},
    ports::Notification,
};
use serde::{Deserialize, Serialize};

//=========================================================================================
// Messages Sent FROM the Client (Browser) TO the Server
//=========================================================================================

/// Represents the structured text messages a client can send to the server.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A file was picked or dropped. Replaces any task already running.
    SubmitFile {
        name: String,
        size: u64,
        mime_type: String,
    },

    /// Discards the current task and returns the analyzer to idle.
    Reset,

    /// Copies arbitrary text to the clipboard.
    CopyText { content: String },

    /// Copies the summary of the finished analysis.
    CopySummary,

    /// Exports the finished analysis.
    Export { format: ExportFormat },

    /// Asks for a fresh snapshot of the pipeline.
    Snapshot,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Json,
    SummaryText,
}

//=========================================================================================
// Messages Sent FROM the Server TO the Client (Browser)
//=========================================================================================

/// Represents the structured text messages the server can send to the client.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Sent once when the socket opens.
    Connected { snapshot: PipelineSnapshot },

    /// A new task was created at 0%.
    UploadStarted {
        file: FileHandle,
        advisories: Vec<String>,
    },

    UploadProgress { progress: u8 },

    StepUpdated {
        index: usize,
        label: String,
        status: StepStatus,
    },

    /// The last step completed; the analysis is now visible.
    ResultReady { result: AnalysisResult },

    /// The analyzer is idle again.
    PipelineReset,

    Snapshot { snapshot: PipelineSnapshot },

    Notification(Notification),

    Navigate { path: String },

    /// The client should place `content` on the system clipboard.
    ClipboardWrite { content: String },

    /// Reports a protocol error; the connection stays open.
    Error { message: String },
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
