//! Execution supervisor - one concurrent task per running pipeline

use crate::core::{PipelineContext, PipelineStatus, PipelineStep, StepStatus};
use crate::executor::{ExecutorRegistry, StepOutcome};
use crate::store::JobStore;
use anyhow::bail;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Progress reported the moment a step starts executing
const PROGRESS_STARTED: u8 = 10;
/// Progress of a finished (completed or skipped) step
const PROGRESS_DONE: u8 = 100;

/// Handle to one running pipeline task
struct TaskHandle {
    join: JoinHandle<()>,
    cancelled: Arc<AtomicBool>,
}

/// How a single step execution ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepRun {
    /// Step completed successfully, continue with the next one
    Completed,
    /// Step was skipped, continue with the next one
    Skipped,
    /// Step failed, the pipeline must stop
    Failed,
    /// The pipeline record disappeared mid-run (concurrent delete)
    Detached,
}

/// Drives sequential step execution for every running pipeline
///
/// Each started pipeline gets its own tokio task, tracked in a registry
/// keyed by pipeline id together with a cooperative cancellation flag.
/// Tasks always deregister themselves on exit, whatever the outcome.
pub struct ExecutionSupervisor {
    store: Arc<JobStore>,
    registry: Arc<ExecutorRegistry>,
    tasks: RwLock<HashMap<Uuid, TaskHandle>>,
}

impl ExecutionSupervisor {
    /// Create a supervisor over the given store and executor registry
    pub fn new(store: Arc<JobStore>, registry: Arc<ExecutorRegistry>) -> Self {
        Self {
            store,
            registry,
            tasks: RwLock::new(HashMap::new()),
        }
    }

    /// Spawn the execution task for a pipeline already in Processing status
    ///
    /// Must be called from within a tokio runtime. The handle is registered
    /// under the same lock the task takes to deregister, so even a task that
    /// finishes instantly cannot slip out before its handle is recorded.
    pub fn spawn(self: &Arc<Self>, id: Uuid) {
        let mut tasks = self.tasks.write();
        if tasks.contains_key(&id) {
            warn!(pipeline_id = %id, "task already running, not spawning another");
            return;
        }

        let cancelled = Arc::new(AtomicBool::new(false));
        let supervisor = Arc::clone(self);
        let flag = Arc::clone(&cancelled);
        let join = tokio::spawn(async move { supervisor.run(id, flag).await });

        tasks.insert(id, TaskHandle { join, cancelled });
    }

    /// Signal a running task to stop at the next step boundary
    ///
    /// The in-flight step call, if any, is not interrupted. Returns false
    /// when no task is registered for the id.
    pub fn signal_cancel(&self, id: Uuid) -> bool {
        let tasks = self.tasks.read();
        match tasks.get(&id) {
            Some(handle) => {
                handle.cancelled.store(true, Ordering::SeqCst);
                true
            }
            None => false,
        }
    }

    /// Abort the task for a pipeline and deregister its handle
    ///
    /// Used by delete, where the record is about to vanish and cooperative
    /// draining has nothing left to report into.
    pub fn abort(&self, id: Uuid) -> bool {
        match self.tasks.write().remove(&id) {
            Some(handle) => {
                handle.cancelled.store(true, Ordering::SeqCst);
                handle.join.abort();
                true
            }
            None => false,
        }
    }

    /// Check whether a pipeline currently has a running task
    pub fn is_running(&self, id: Uuid) -> bool {
        self.tasks.read().contains_key(&id)
    }

    /// Number of currently running pipeline tasks
    pub fn running_count(&self) -> usize {
        self.tasks.read().len()
    }

    /// Task body: execute the pipeline, then always deregister
    async fn run(self: Arc<Self>, id: Uuid, cancelled: Arc<AtomicBool>) {
        if let Err(err) = self.execute_pipeline(id, &cancelled).await {
            // never leave a pipeline stuck in Processing
            error!(pipeline_id = %id, error = %err, "pipeline task error");
            self.store
                .compare_and_set_status(id, PipelineStatus::Processing, PipelineStatus::Failed);
        }

        self.tasks.write().remove(&id);
    }

    /// Execute every step of a pipeline in order
    async fn execute_pipeline(&self, id: Uuid, cancelled: &AtomicBool) -> anyhow::Result<()> {
        let Some(pipeline) = self.store.get(id) else {
            return Ok(());
        };
        let total = pipeline.total_steps;

        for index in 0..total {
            // cancellation is checked only at step boundaries
            if cancelled.load(Ordering::SeqCst) {
                info!(pipeline_id = %id, "cancellation requested, stopping execution");
                return Ok(());
            }

            let Some(pipeline) = self.store.get(id) else {
                return Ok(());
            };
            match pipeline.status {
                PipelineStatus::Cancelled => {
                    info!(pipeline_id = %id, "pipeline cancelled, stopping execution");
                    return Ok(());
                }
                PipelineStatus::Processing => {}
                other => {
                    warn!(pipeline_id = %id, status = ?other, "pipeline left Processing externally, stopping");
                    return Ok(());
                }
            }

            let Some(step) = pipeline.steps.get(index).cloned() else {
                bail!("step {index} missing from pipeline record");
            };
            let ctx = PipelineContext::for_pipeline(&pipeline);

            match self.execute_step(id, index, step, ctx).await {
                StepRun::Completed | StepRun::Skipped => {}
                StepRun::Detached => return Ok(()),
                StepRun::Failed => {
                    if self.store.compare_and_set_status(
                        id,
                        PipelineStatus::Processing,
                        PipelineStatus::Failed,
                    ) {
                        error!(pipeline_id = %id, "pipeline failed");
                    }
                    return Ok(());
                }
            }
        }

        // a lost CAS here means cancellation won while the last step ran
        if self
            .store
            .compare_and_set_status(id, PipelineStatus::Processing, PipelineStatus::Completed)
        {
            info!(pipeline_id = %id, "pipeline completed");
        }

        Ok(())
    }

    /// Execute one step and record its outcome on the store
    async fn execute_step(
        &self,
        pipeline_id: Uuid,
        index: usize,
        step: PipelineStep,
        ctx: PipelineContext,
    ) -> StepRun {
        let started = Utc::now();
        let marked = self.store.update(pipeline_id, |p| {
            if let Some(s) = p.steps.get_mut(index) {
                s.status = StepStatus::Processing;
                s.started_at = Some(started);
                s.progress = PROGRESS_STARTED;
            }
        });
        if !marked {
            return StepRun::Detached;
        }

        info!(
            pipeline_id = %pipeline_id,
            step_id = %step.step_id,
            step_type = %step.step_type,
            "step started"
        );

        let result = self.registry.execute(pipeline_id, &step, &ctx).await;
        let finished = Utc::now();

        match result {
            Ok(StepOutcome::Completed { output }) => {
                let updated = self.store.update(pipeline_id, |p| {
                    if let Some(s) = p.steps.get_mut(index) {
                        s.status = StepStatus::Completed;
                        s.output = Some(output);
                        s.progress = PROGRESS_DONE;
                        s.completed_at = Some(finished);
                        p.completed_steps += 1;
                    }
                });
                if !updated {
                    return StepRun::Detached;
                }
                info!(
                    pipeline_id = %pipeline_id,
                    step_id = %step.step_id,
                    "step completed"
                );
                StepRun::Completed
            }
            Ok(StepOutcome::Skipped { reason }) => {
                let updated = self.store.update(pipeline_id, |p| {
                    if let Some(s) = p.steps.get_mut(index) {
                        s.status = StepStatus::Skipped;
                        s.error = Some(reason);
                        s.progress = PROGRESS_DONE;
                        s.completed_at = Some(finished);
                    }
                });
                if !updated {
                    return StepRun::Detached;
                }
                StepRun::Skipped
            }
            Err(err) => {
                let message = err.to_string();
                error!(
                    pipeline_id = %pipeline_id,
                    step_id = %step.step_id,
                    step_type = %step.step_type,
                    error = %message,
                    "step failed"
                );
                let updated = self.store.update(pipeline_id, |p| {
                    if let Some(s) = p.steps.get_mut(index) {
                        s.status = StepStatus::Failed;
                        s.error = Some(message.clone());
                        s.progress = 0;
                        s.completed_at = Some(finished);
                    }
                });
                if !updated {
                    return StepRun::Detached;
                }
                StepRun::Failed
            }
        }
    }
}

impl std::fmt::Debug for ExecutionSupervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionSupervisor")
            .field("running", &self.running_count())
            .finish()
    }
}
