//! services/dashboard/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::web::{analyzer_task::PipelineTimings, session_provider::SessionProvider};
use legalvision_core::ports::DocumentExporter;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionProvider>,
    pub exporter: Arc<dyn DocumentExporter>,
    pub timings: PipelineTimings,
}
