//! Executor registry - maps step types to their capabilities

use crate::core::{PipelineContext, PipelineStep, StepType};
use crate::executor::{
    custom::CustomStepExecutor,
    outcome::{ServiceError, StepOutcome},
    StepExecutor,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Registry of step executors keyed by step type
///
/// Dispatching a step type with no registered executor yields a skip, not
/// an error: a disabled capability degrades a pipeline to partial
/// completion instead of failing it.
#[derive(Default)]
pub struct ExecutorRegistry {
    executors: RwLock<HashMap<StepType, Arc<dyn StepExecutor>>>,
}

impl ExecutorRegistry {
    /// Create an empty registry (every step type skips)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in custom step executor registered
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(StepType::Custom, Arc::new(CustomStepExecutor));
        registry
    }

    /// Register (or replace) the executor for a step type
    pub fn register(&self, step_type: StepType, executor: Arc<dyn StepExecutor>) {
        self.executors.write().insert(step_type, executor);
    }

    /// Remove the executor for a step type, disabling it
    pub fn deregister(&self, step_type: StepType) -> bool {
        self.executors.write().remove(&step_type).is_some()
    }

    /// Check whether a step type has a registered executor
    pub fn is_registered(&self, step_type: StepType) -> bool {
        self.executors.read().contains_key(&step_type)
    }

    /// Dispatch a step to its registered executor
    pub async fn execute(
        &self,
        pipeline_id: Uuid,
        step: &PipelineStep,
        ctx: &PipelineContext,
    ) -> Result<StepOutcome, ServiceError> {
        let executor = self.executors.read().get(&step.step_type).cloned();

        match executor {
            Some(executor) => executor.execute(pipeline_id, step, ctx).await,
            None => {
                warn!(
                    pipeline_id = %pipeline_id,
                    step_id = %step.step_id,
                    step_type = %step.step_type,
                    "step skipped - service disabled"
                );
                Ok(StepOutcome::skipped(format!(
                    "{} service is currently disabled",
                    step.step_type
                )))
            }
        }
    }
}

impl std::fmt::Debug for ExecutorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutorRegistry")
            .field("registered", &self.executors.read().len())
            .finish()
    }
}
