//! vidpipe - multi-step video processing pipeline orchestrator
//!
//! Pipelines are built from a caller-supplied configuration as an ordered
//! list of typed steps, run one tokio task per pipeline with strictly
//! sequential steps, and track lifecycle and progress in an in-memory job
//! store. Actual step work (video generation, transcoding, transcription,
//! analysis) is delegated to [`StepExecutor`] implementations registered
//! per step type; state lives only for the life of the process.

pub mod core;
pub mod execution;
pub mod executor;
pub mod store;
pub mod telemetry;

// Re-export commonly used types
pub use crate::core::{
    Pipeline, PipelineConfig, PipelineContext, PipelineStatus, PipelineStep, StepStatus,
    StepType, ValidationError,
};
pub use crate::execution::{ExecutionSupervisor, PipelineError, PipelineManager};
pub use crate::executor::{
    CustomStepExecutor, ExecutorRegistry, ServiceError, StepExecutor, StepOutcome,
};
pub use crate::store::JobStore;
