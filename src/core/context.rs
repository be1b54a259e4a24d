//! Pipeline context handed to step executors

use crate::core::pipeline::Pipeline;
use crate::core::status::StepStatus;
use serde_json::{Map, Value};
use std::collections::HashMap;
use uuid::Uuid;

/// Read-only pipeline data an executor may need while performing a step
///
/// Carries the source material and prompt plus the outputs of steps that
/// have already completed, so later steps can build on earlier results
/// without touching the store-owned record.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    /// Source material URL
    pub video_url: String,

    /// Free-text prompt for the pipeline
    pub prompt: String,

    /// Outputs of completed steps, keyed by step id
    pub step_outputs: HashMap<Uuid, Map<String, Value>>,
}

impl PipelineContext {
    /// Build a context from a pipeline snapshot
    pub fn for_pipeline(pipeline: &Pipeline) -> Self {
        let step_outputs = pipeline
            .steps
            .iter()
            .filter(|s| s.status == StepStatus::Completed)
            .filter_map(|s| s.output.clone().map(|out| (s.step_id, out)))
            .collect();

        Self {
            video_url: pipeline.video_url.clone(),
            prompt: pipeline.prompt.clone(),
            step_outputs,
        }
    }

    /// Get the output of a completed step
    pub fn step_output(&self, step_id: &Uuid) -> Option<&Map<String, Value>> {
        self.step_outputs.get(step_id)
    }
}
