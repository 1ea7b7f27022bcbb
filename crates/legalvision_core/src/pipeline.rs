//! crates/legalvision_core/src/pipeline.rs
//!
//! The upload/processing state machine: `idle → uploading → processing → complete`.
//!
//! This type performs no timing of its own. A driver calls the transition
//! methods on a schedule; every call is checked against the ordering
//! invariants and against the `TaskId` of the task it was scheduled for.

use crate::domain::{
    AnalysisResult, FileHandle, PipelinePhase, PipelineSnapshot, StepStatus, UploadTask,
};
use crate::fixtures::sample_deed_analysis;

/// Identifies one `submit` of a file. A new submit or a reset invalidates
/// every earlier id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("no upload task is active")]
    Idle,
    #[error("task {0:?} is no longer the active task")]
    StaleTask(TaskId),
    #[error("upload is still at {0}%")]
    UploadIncomplete(u8),
    #[error("upload already finished")]
    UploadFinished,
    #[error("step {0} is already processing")]
    StepInFlight(usize),
    #[error("no step is processing")]
    NoStepInFlight,
    #[error("all steps are already complete")]
    AlreadyComplete,
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// What `complete_step` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepCompletion {
    pub index: usize,
    /// True when this was the last step and the result is now visible.
    pub finished: bool,
}

#[derive(Debug, Default)]
pub struct Pipeline {
    next_id: u64,
    active: Option<ActiveTask>,
}

#[derive(Debug)]
struct ActiveTask {
    id: TaskId,
    task: UploadTask,
    result: Option<AnalysisResult>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards any current task and starts a fresh one at 0%.
    pub fn submit(&mut self, file: FileHandle) -> TaskId {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        self.active = Some(ActiveTask {
            id,
            task: UploadTask::new(file),
            result: None,
        });
        id
    }

    /// Returns to idle from any state.
    pub fn reset(&mut self) {
        self.active = None;
    }

    pub fn phase(&self) -> PipelinePhase {
        let Some(active) = &self.active else {
            return PipelinePhase::Idle;
        };
        let task = &active.task;
        if task.complete {
            return PipelinePhase::Complete;
        }
        if task.progress < 100 {
            return PipelinePhase::Uploading {
                progress: task.progress,
            };
        }
        let step_index = task
            .steps
            .iter()
            .position(|s| s.status != StepStatus::Complete)
            .unwrap_or(task.steps.len());
        PipelinePhase::Processing { step_index }
    }

    pub fn task(&self) -> Option<&UploadTask> {
        self.active.as_ref().map(|a| &a.task)
    }

    pub fn current_id(&self) -> Option<TaskId> {
        self.active.as_ref().map(|a| a.id)
    }

    /// The analysis, only once the last step has completed.
    pub fn result(&self) -> Option<&AnalysisResult> {
        self.active.as_ref().and_then(|a| a.result.as_ref())
    }

    pub fn snapshot(&self) -> PipelineSnapshot {
        PipelineSnapshot {
            phase: self.phase(),
            task: self.task().cloned(),
            result: self.result().cloned(),
        }
    }

    /// Raises upload progress by `increment`, clamped at 100.
    pub fn advance_upload(&mut self, id: TaskId, increment: u8) -> PipelineResult<u8> {
        let task = self.task_mut(id)?;
        if task.progress >= 100 {
            return Err(PipelineError::UploadFinished);
        }
        task.progress = task.progress.saturating_add(increment).min(100);
        Ok(task.progress)
    }

    /// Moves the first pending step to `processing`. Returns its index.
    pub fn begin_step(&mut self, id: TaskId) -> PipelineResult<usize> {
        let task = self.task_mut(id)?;
        if task.progress < 100 {
            return Err(PipelineError::UploadIncomplete(task.progress));
        }
        if let Some(index) = task
            .steps
            .iter()
            .position(|s| s.status == StepStatus::Processing)
        {
            return Err(PipelineError::StepInFlight(index));
        }
        // Steps complete in order, so the first pending step has only
        // completed steps before it.
        let index = task
            .steps
            .iter()
            .position(|s| s.status == StepStatus::Pending)
            .ok_or(PipelineError::AlreadyComplete)?;
        task.steps[index].status = StepStatus::Processing;
        Ok(index)
    }

    /// Marks the processing step complete; after the last step the task is
    /// complete and the result becomes visible.
    pub fn complete_step(&mut self, id: TaskId) -> PipelineResult<StepCompletion> {
        let active = self.active_mut(id)?;
        let task = &mut active.task;
        let index = task
            .steps
            .iter()
            .position(|s| s.status == StepStatus::Processing)
            .ok_or(PipelineError::NoStepInFlight)?;
        task.steps[index].status = StepStatus::Complete;

        let finished = index + 1 == task.steps.len();
        if finished {
            task.complete = true;
            active.result = Some(sample_deed_analysis());
        }
        Ok(StepCompletion { index, finished })
    }

    fn active_mut(&mut self, id: TaskId) -> PipelineResult<&mut ActiveTask> {
        let active = self.active.as_mut().ok_or(PipelineError::Idle)?;
        if active.id != id {
            return Err(PipelineError::StaleTask(id));
        }
        Ok(active)
    }

    fn task_mut(&mut self, id: TaskId) -> PipelineResult<&mut UploadTask> {
        Ok(&mut self.active_mut(id)?.task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deed() -> FileHandle {
        FileHandle::new("deed.pdf", 2_000_000, "application/pdf")
    }

    fn upload_fully(p: &mut Pipeline, id: TaskId) {
        while p.advance_upload(id, 10).unwrap() < 100 {}
    }

    #[test]
    fn fresh_pipeline_is_idle() {
        let p = Pipeline::new();
        assert_eq!(p.phase(), PipelinePhase::Idle);
        assert!(p.result().is_none());
    }

    #[test]
    fn upload_clamps_at_one_hundred() {
        let mut p = Pipeline::new();
        let id = p.submit(deed());
        assert_eq!(p.advance_upload(id, 60).unwrap(), 60);
        assert_eq!(p.advance_upload(id, 60).unwrap(), 100);
        assert_eq!(p.advance_upload(id, 1), Err(PipelineError::UploadFinished));
    }

    #[test]
    fn steps_wait_for_upload() {
        let mut p = Pipeline::new();
        let id = p.submit(deed());
        p.advance_upload(id, 90).unwrap();
        assert_eq!(p.begin_step(id), Err(PipelineError::UploadIncomplete(90)));
    }

    #[test]
    fn steps_run_strictly_in_order_and_reveal_result() {
        let mut p = Pipeline::new();
        let id = p.submit(deed());
        upload_fully(&mut p, id);

        for expected in 0..4 {
            assert_eq!(p.phase(), PipelinePhase::Processing { step_index: expected });
            assert_eq!(p.begin_step(id).unwrap(), expected);
            assert_eq!(p.begin_step(id), Err(PipelineError::StepInFlight(expected)));
            assert!(p.result().is_none());
            let done = p.complete_step(id).unwrap();
            assert_eq!(done.index, expected);
            assert_eq!(done.finished, expected == 3);
        }

        assert_eq!(p.phase(), PipelinePhase::Complete);
        assert_eq!(p.result().map(|r| r.document_info.confidence), Some(94));
        assert_eq!(p.begin_step(id), Err(PipelineError::AlreadyComplete));
    }

    #[test]
    fn complete_without_processing_step_is_rejected() {
        let mut p = Pipeline::new();
        let id = p.submit(deed());
        upload_fully(&mut p, id);
        assert_eq!(p.complete_step(id), Err(PipelineError::NoStepInFlight));
    }

    #[test]
    fn stale_ids_cannot_touch_a_newer_task() {
        let mut p = Pipeline::new();
        let old = p.submit(deed());
        p.advance_upload(old, 30).unwrap();
        let new = p.submit(deed());
        assert_eq!(p.advance_upload(old, 10), Err(PipelineError::StaleTask(old)));
        assert_eq!(p.task().unwrap().progress, 0);
        assert_ne!(old, new);
    }

    #[test]
    fn reset_mid_processing_returns_to_idle() {
        let mut p = Pipeline::new();
        let id = p.submit(deed());
        upload_fully(&mut p, id);
        p.begin_step(id).unwrap();
        p.complete_step(id).unwrap();
        p.begin_step(id).unwrap();

        p.reset();
        assert_eq!(p.phase(), PipelinePhase::Idle);
        assert!(p.task().is_none());
        assert_eq!(p.complete_step(id), Err(PipelineError::Idle));

        let fresh = p.submit(deed());
        assert_eq!(p.phase(), PipelinePhase::Uploading { progress: 0 });
        assert!(p
            .task()
            .unwrap()
            .steps
            .iter()
            .all(|s| s.status == StepStatus::Pending));
        assert_ne!(fresh, id);
    }
}
