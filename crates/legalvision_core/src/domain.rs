//! crates/legalvision_core/src/domain.rs
//!
//! Defines the pure, core data structures for the dashboard.
//! The session record is independent of any storage format; the pipeline
//! types derive `Serialize` so the shell can stream snapshots as-is.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

//=========================================================================================
// Session
//=========================================================================================

/// The identity record held for the current browser context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub firm: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

//=========================================================================================
// Upload / Processing Pipeline
//=========================================================================================

/// A resolved file handle, agnostic to whether it came from a picker or a drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileHandle {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }

    /// Lower-cased extension of the file name, if it has one.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

/// The fixed, ordered stages of the simulated analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    TextExtraction,
    LanguageDetection,
    Summarization,
    StructuredOutput,
}

impl StepKind {
    /// Every step, in the order the pipeline runs them.
    pub const ALL: [StepKind; 4] = [
        StepKind::TextExtraction,
        StepKind::LanguageDetection,
        StepKind::Summarization,
        StepKind::StructuredOutput,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StepKind::TextExtraction => "Text extraction",
            StepKind::LanguageDetection => "Language detection",
            StepKind::Summarization => "AI summarization",
            StepKind::StructuredOutput => "Generating structured output",
        }
    }
}

/// Status of a single step. The derived ordering is the only legal direction
/// of travel: `Pending < Processing < Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Processing,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessingStep {
    pub kind: StepKind,
    pub label: &'static str,
    pub status: StepStatus,
}

impl ProcessingStep {
    pub fn pending(kind: StepKind) -> Self {
        Self {
            kind,
            label: kind.label(),
            status: StepStatus::Pending,
        }
    }
}

/// One in-flight simulated document submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadTask {
    pub file: FileHandle,
    /// Upload percentage, 0..=100, never decreasing.
    pub progress: u8,
    pub steps: Vec<ProcessingStep>,
    pub complete: bool,
}

impl UploadTask {
    pub fn new(file: FileHandle) -> Self {
        Self {
            file,
            progress: 0,
            steps: StepKind::ALL.iter().copied().map(ProcessingStep::pending).collect(),
            complete: false,
        }
    }
}

/// Where the pipeline currently sits in `idle → uploading → processing → complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PipelinePhase {
    Idle,
    Uploading { progress: u8 },
    Processing { step_index: usize },
    Complete,
}

/// A point-in-time copy of the pipeline, suitable for sending to a client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineSnapshot {
    #[serde(flatten)]
    pub phase: PipelinePhase,
    pub task: Option<UploadTask>,
    pub result: Option<AnalysisResult>,
}

//=========================================================================================
// Analysis Result
//=========================================================================================

/// The structured output revealed once every step has completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub document_info: DocumentInfo,
    pub parties: Parties,
    pub property: PropertyDetails,
    pub administrative: AdministrativeDetails,
    pub consideration: String,
    pub prior_deeds: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    pub document_type: String,
    pub date: String,
    pub registry: String,
    pub code: String,
    pub pages: u32,
    /// Extraction confidence, 0..=100.
    pub confidence: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parties {
    pub vendor: Party,
    pub vendee: Party,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Party {
    pub name: String,
    pub nic: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    pub plan_number: String,
    pub lot_numbers: String,
    pub extent: String,
    pub assessment_no: String,
    pub boundaries: Boundaries,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Boundaries {
    pub north: String,
    pub east: String,
    pub south: String,
    pub west: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdministrativeDetails {
    pub district: String,
    pub province: String,
    pub ds_division: String,
    pub registry: String,
}
