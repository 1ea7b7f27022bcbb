//! services/dashboard/src/web/analyzer_task.rs
//!
//! Drives the simulated upload and processing steps for one analyzer view.
//!
//! The timers for a task live in a single spawned worker. The runner keeps its
//! `CancellationToken` and `JoinHandle`, and every operation that replaces or
//! discards the task cancels and awaits the worker before touching state.

use legalvision_core::{
    domain::{AnalysisResult, FileHandle, PipelineSnapshot, StepStatus},
    fixtures::upload_advisories,
    pipeline::{Pipeline, PipelineResult, TaskId},
    ports::{Notification, Notifier},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::{
    sync::{mpsc::UnboundedSender, Mutex},
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::web::protocol::ServerMessage;

/// How fast the simulation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineTimings {
    pub upload_tick: Duration,
    pub upload_increment: u8,
    /// Pause before each step starts.
    pub step_delay: Duration,
    /// How long each step stays `processing`.
    pub step_duration: Duration,
}

impl Default for PipelineTimings {
    fn default() -> Self {
        Self {
            upload_tick: Duration::from_millis(150),
            upload_increment: 10,
            step_delay: Duration::from_millis(500),
            step_duration: Duration::from_millis(1000),
        }
    }
}

struct ActiveRun {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

pub struct PipelineRunner {
    pipeline: Arc<Mutex<Pipeline>>,
    timings: PipelineTimings,
    events: UnboundedSender<ServerMessage>,
    notifier: Arc<dyn Notifier>,
    active: Option<ActiveRun>,
}

impl PipelineRunner {
    pub fn new(
        timings: PipelineTimings,
        events: UnboundedSender<ServerMessage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            pipeline: Arc::new(Mutex::new(Pipeline::new())),
            timings,
            events,
            notifier,
            active: None,
        }
    }

    /// Replaces any current task with a fresh one for `file` and starts the upload ramp.
    pub async fn submit_file(&mut self, file: FileHandle) -> TaskId {
        self.cancel_active().await;

        let advisories = upload_advisories(&file);
        let task_id = self.pipeline.lock().await.submit(file.clone());
        info!(
            "Analyzing {} ({} bytes, {})",
            file.name, file.size, file.mime_type
        );
        self.emit(ServerMessage::UploadStarted { file, advisories });

        let token = CancellationToken::new();
        let handle = {
            let pipeline = self.pipeline.clone();
            let events = self.events.clone();
            let notifier = self.notifier.clone();
            let timings = self.timings;
            let token = token.clone();
            tokio::spawn(async move {
                if let Err(e) =
                    analysis_process(pipeline, task_id, timings, events, notifier, token).await
                {
                    error!("Analysis process failed: {}", e);
                }
            })
        };
        self.active = Some(ActiveRun { token, handle });
        task_id
    }

    /// Cancels any in-flight timers and returns the pipeline to idle.
    pub async fn reset(&mut self) {
        self.cancel_active().await;
        self.pipeline.lock().await.reset();
        info!("Analyzer reset.");
        self.emit(ServerMessage::PipelineReset);
    }

    /// Stops the worker without emitting anything. Called on disconnect.
    pub async fn shutdown(&mut self) {
        self.cancel_active().await;
    }

    pub async fn snapshot(&self) -> PipelineSnapshot {
        self.pipeline.lock().await.snapshot()
    }

    /// The finished analysis, if the current task has completed.
    pub async fn result(&self) -> Option<AnalysisResult> {
        self.pipeline.lock().await.result().cloned()
    }

    async fn cancel_active(&mut self) {
        if let Some(run) = self.active.take() {
            run.token.cancel();
            if let Err(e) = run.handle.await {
                error!("Analysis worker ended abnormally: {}", e);
            }
        }
    }

    fn emit(&self, message: ServerMessage) {
        if self.events.send(message).is_err() {
            debug!("Analyzer client is gone; dropping event.");
        }
    }
}

/// Waits `duration` unless cancelled first. Returns false on cancellation.
async fn pause(token: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        _ = token.cancelled() => false,
        _ = tokio::time::sleep(duration) => true,
    }
}

/// The worker for a single task: upload ramp, then each step in order.
async fn analysis_process(
    pipeline: Arc<Mutex<Pipeline>>,
    task_id: TaskId,
    timings: PipelineTimings,
    events: UnboundedSender<ServerMessage>,
    notifier: Arc<dyn Notifier>,
    token: CancellationToken,
) -> PipelineResult<()> {
    let send = |message: ServerMessage| {
        let _ = events.send(message);
    };

    // --- 1. Upload Ramp ---
    let mut ticker = interval_at(Instant::now() + timings.upload_tick, timings.upload_tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = token.cancelled() => {
                debug!("Upload cancelled.");
                return Ok(());
            }
            _ = ticker.tick() => {}
        }
        let progress = pipeline
            .lock()
            .await
            .advance_upload(task_id, timings.upload_increment)?;
        send(ServerMessage::UploadProgress { progress });
        if progress >= 100 {
            break;
        }
    }

    // --- 2. Processing Steps ---
    loop {
        if !pause(&token, timings.step_delay).await {
            debug!("Processing cancelled between steps.");
            return Ok(());
        }

        let (index, label) = {
            let mut guard = pipeline.lock().await;
            let index = guard.begin_step(task_id)?;
            let label = guard
                .task()
                .map(|t| t.steps[index].label.to_string())
                .unwrap_or_default();
            (index, label)
        };
        send(ServerMessage::StepUpdated {
            index,
            label: label.clone(),
            status: StepStatus::Processing,
        });

        if !pause(&token, timings.step_duration).await {
            debug!("Processing cancelled during step {}.", index);
            return Ok(());
        }

        let (completion, result) = {
            let mut guard = pipeline.lock().await;
            let completion = guard.complete_step(task_id)?;
            let result = completion.finished.then(|| guard.result().cloned()).flatten();
            (completion, result)
        };
        send(ServerMessage::StepUpdated {
            index: completion.index,
            label,
            status: StepStatus::Complete,
        });

        if completion.finished {
            if let Some(result) = result {
                send(ServerMessage::ResultReady { result });
            }
            info!("Analysis complete.");
            notifier.notify(Notification::info(
                "Analysis Complete",
                "Document has been successfully analyzed.",
            ));
            return Ok(());
        }
    }
}
