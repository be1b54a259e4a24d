//! Step executors - the seam to the services performing actual step work

pub mod custom;
pub mod outcome;
pub mod registry;

use crate::core::{PipelineContext, PipelineStep};
use async_trait::async_trait;
use uuid::Uuid;

pub use custom::CustomStepExecutor;
pub use outcome::{ServiceError, StepOutcome};
pub use registry::ExecutorRegistry;

/// Trait for step execution - one implementation per step type
///
/// Implementations perform the delegated work (network calls, subprocess
/// invocation) and report the result; the orchestrator never interrupts an
/// in-flight call, so long-running work should be internally bounded.
#[async_trait]
pub trait StepExecutor: Send + Sync {
    /// Perform the step's work and return its outcome
    async fn execute(
        &self,
        pipeline_id: Uuid,
        step: &PipelineStep,
        ctx: &PipelineContext,
    ) -> Result<StepOutcome, ServiceError>;
}
