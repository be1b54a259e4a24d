//! Built-in executor for caller-defined custom steps

use crate::core::{PipelineContext, PipelineStep};
use crate::executor::{
    outcome::{ServiceError, StepOutcome},
    StepExecutor,
};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use uuid::Uuid;

/// Executor for [`StepType::Custom`](crate::core::StepType::Custom) steps
///
/// Echoes the step's input payload back under `step_data`; real custom
/// processing belongs in a caller-registered replacement.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomStepExecutor;

#[async_trait]
impl StepExecutor for CustomStepExecutor {
    async fn execute(
        &self,
        _pipeline_id: Uuid,
        step: &PipelineStep,
        _ctx: &PipelineContext,
    ) -> Result<StepOutcome, ServiceError> {
        let mut output = Map::new();
        output.insert("custom_result".to_string(), json!("custom step processed"));
        output.insert("step_data".to_string(), Value::Object(step.input.clone()));
        output.insert("status".to_string(), json!("success"));

        Ok(StepOutcome::completed(output))
    }
}
