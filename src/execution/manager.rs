//! Pipeline manager - the public orchestration surface

use crate::core::{
    validate::{validate_id, validate_prompt, validate_video_url},
    Pipeline, PipelineConfig, PipelineStatus, ValidationError,
};
use crate::execution::supervisor::ExecutionSupervisor;
use crate::executor::ExecutorRegistry;
use crate::store::JobStore;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Error types for operations on missing or wrongly-staged pipelines
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("pipeline {0} not found")]
    NotFound(Uuid),

    #[error("pipeline {0} already started")]
    AlreadyStarted(Uuid),
}

/// Orchestrates pipeline lifecycles: creation, start, cancellation,
/// deletion and status reads
///
/// An explicitly constructed instance owning its job store and supervisor;
/// hand a shared reference to whatever serves the transport boundary. The
/// registry stays shared with the caller, so executors can be registered
/// or deregistered while the manager is live.
pub struct PipelineManager {
    store: Arc<JobStore>,
    supervisor: Arc<ExecutionSupervisor>,
}

impl PipelineManager {
    /// Create a manager dispatching steps through the given registry
    pub fn new(registry: Arc<ExecutorRegistry>) -> Self {
        let store = Arc::new(JobStore::new());
        let supervisor = Arc::new(ExecutionSupervisor::new(Arc::clone(&store), registry));

        Self { store, supervisor }
    }

    /// Validate inputs and register a new pending pipeline
    ///
    /// Does not start execution, and performs no deduplication by video id;
    /// callers that want idempotent submission check [`find_by_video`]
    /// first (the check is not atomic with creation).
    ///
    /// [`find_by_video`]: PipelineManager::find_by_video
    pub fn create(
        &self,
        video_id: &str,
        video_url: &str,
        prompt: &str,
        config: Option<PipelineConfig>,
    ) -> Result<Pipeline, ValidationError> {
        validate_id(video_id, "videoId")?;
        validate_video_url(video_url)?;
        validate_prompt(prompt)?;

        let config = config.unwrap_or_default();
        let pipeline = Pipeline::new(video_id, video_url, prompt, &config);
        let snapshot = pipeline.clone();

        info!(
            pipeline_id = %pipeline.pipeline_id,
            video_id = %video_id,
            total_steps = pipeline.total_steps,
            "pipeline created"
        );
        self.store.insert(pipeline);

        Ok(snapshot)
    }

    /// Start executing a pending pipeline
    ///
    /// Transitions the pipeline from Pending to Processing and spawns its
    /// execution task. Must be called from within a tokio runtime.
    pub fn start(&self, id: Uuid) -> Result<(), PipelineError> {
        if !self
            .store
            .compare_and_set_status(id, PipelineStatus::Pending, PipelineStatus::Processing)
        {
            // distinguish a missing pipeline from one past Pending
            return match self.store.status(id) {
                None => Err(PipelineError::NotFound(id)),
                Some(_) => Err(PipelineError::AlreadyStarted(id)),
            };
        }

        info!(pipeline_id = %id, "pipeline started");
        self.supervisor.spawn(id);
        Ok(())
    }

    /// Cancel a pipeline
    ///
    /// Returns false when the pipeline does not exist. Cancelling an
    /// already-terminal pipeline returns true without effect: the
    /// compare-and-set adjudicates the cancel-vs-complete race and a
    /// terminal result is never unset. The running task, if any, stops
    /// cooperatively at its next step boundary.
    pub fn cancel(&self, id: Uuid) -> bool {
        loop {
            let Some(status) = self.store.status(id) else {
                return false;
            };
            if status.is_terminal() {
                return true;
            }
            if self
                .store
                .compare_and_set_status(id, status, PipelineStatus::Cancelled)
            {
                self.supervisor.signal_cancel(id);
                info!(pipeline_id = %id, "pipeline cancelled");
                return true;
            }
            // status moved between read and CAS; re-read and retry
        }
    }

    /// Delete a pipeline, stopping its task if one is running
    ///
    /// Returns false when the pipeline does not exist. Nothing about the
    /// pipeline is observable afterwards.
    pub fn delete(&self, id: Uuid) -> bool {
        self.supervisor.abort(id);
        let removed = self.store.remove(id);
        if removed {
            info!(pipeline_id = %id, "pipeline deleted");
        }
        removed
    }

    /// Snapshot of a pipeline
    pub fn get(&self, id: Uuid) -> Option<Pipeline> {
        self.store.get(id)
    }

    /// Snapshots of all pipelines
    pub fn list(&self) -> Vec<Pipeline> {
        self.store.list()
    }

    /// Find the pipeline created for a video id, if any
    pub fn find_by_video(&self, video_id: &str) -> Option<Pipeline> {
        self.store.find_by_video(video_id)
    }

    /// Check whether a pipeline currently has a running execution task
    pub fn is_running(&self, id: Uuid) -> bool {
        self.supervisor.is_running(id)
    }
}

impl std::fmt::Debug for PipelineManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineManager")
            .field("pipelines", &self.store.len())
            .field("running", &self.supervisor.running_count())
            .finish()
    }
}
