pub mod domain;
pub mod fixtures;
pub mod identity;
pub mod pipeline;
pub mod ports;

pub use domain::{
    AnalysisResult, FileHandle, PipelinePhase, PipelineSnapshot, ProcessingStep, StepKind,
    StepStatus, UploadTask, UserSession,
};
pub use pipeline::{Pipeline, PipelineError, PipelineResult, StepCompletion, TaskId};
pub use ports::{
    Clipboard, DocumentExporter, Navigator, Notification, Notifier, PortError, PortResult,
    SessionStorage, Severity,
};
