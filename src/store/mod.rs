//! In-memory job store
//!
//! The store is the single synchronization point for pipeline records:
//! every read that feeds a transition decision and every mutation is
//! serialized on the store lock. Reads hand out cloned snapshots, never
//! references into store-owned state.

use crate::core::{Pipeline, PipelineStatus};
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

/// Concurrency-safe keyed container of pipeline records
#[derive(Default)]
pub struct JobStore {
    pipelines: RwLock<HashMap<Uuid, Pipeline>>,
}

impl JobStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pipeline record
    pub fn insert(&self, pipeline: Pipeline) {
        self.pipelines.write().insert(pipeline.pipeline_id, pipeline);
    }

    /// Get a snapshot of a pipeline
    pub fn get(&self, id: Uuid) -> Option<Pipeline> {
        self.pipelines.read().get(&id).cloned()
    }

    /// Get a pipeline's current status
    pub fn status(&self, id: Uuid) -> Option<PipelineStatus> {
        self.pipelines.read().get(&id).map(|p| p.status)
    }

    /// Snapshots of all pipelines
    pub fn list(&self) -> Vec<Pipeline> {
        self.pipelines.read().values().cloned().collect()
    }

    /// Find the pipeline created for a video id, if any
    pub fn find_by_video(&self, video_id: &str) -> Option<Pipeline> {
        self.pipelines
            .read()
            .values()
            .find(|p| p.video_id == video_id)
            .cloned()
    }

    /// Remove a pipeline record; returns false if absent
    pub fn remove(&self, id: Uuid) -> bool {
        self.pipelines.write().remove(&id).is_some()
    }

    /// Number of stored pipelines
    pub fn len(&self) -> usize {
        self.pipelines.read().len()
    }

    /// True if no pipelines are stored
    pub fn is_empty(&self) -> bool {
        self.pipelines.read().is_empty()
    }

    /// Atomically transition a pipeline's status
    ///
    /// Succeeds only when the current status equals `expected`; otherwise
    /// returns false without mutating anything, so the first writer to
    /// reach a terminal status wins any race. Terminal transitions stamp
    /// `completed_at`.
    pub fn compare_and_set_status(
        &self,
        id: Uuid,
        expected: PipelineStatus,
        next: PipelineStatus,
    ) -> bool {
        let mut pipelines = self.pipelines.write();
        let Some(pipeline) = pipelines.get_mut(&id) else {
            return false;
        };
        if pipeline.status != expected {
            return false;
        }

        let now = Utc::now();
        pipeline.status = next;
        pipeline.updated_at = Some(now);
        if next.is_terminal() {
            pipeline.completed_at = Some(now);
        }
        true
    }

    /// Apply a mutation to a pipeline record under the store lock
    ///
    /// Stamps `updated_at`; returns false if the record is absent.
    pub fn update<F>(&self, id: Uuid, f: F) -> bool
    where
        F: FnOnce(&mut Pipeline),
    {
        let mut pipelines = self.pipelines.write();
        let Some(pipeline) = pipelines.get_mut(&id) else {
            return false;
        };
        f(pipeline);
        pipeline.updated_at = Some(Utc::now());
        true
    }
}

impl std::fmt::Debug for JobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobStore")
            .field("pipelines", &self.len())
            .finish()
    }
}
