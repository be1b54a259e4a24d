//! Lifecycle status enums for pipelines and steps

use serde::{Deserialize, Serialize};

/// Overall pipeline lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStatus {
    /// Pipeline has been created but not started
    Pending,
    /// Pipeline is currently executing steps
    Processing,
    /// All steps finished without failure
    Completed,
    /// A step failed and execution stopped
    Failed,
    /// Execution was cancelled by the caller
    Cancelled,
}

impl PipelineStatus {
    /// Check if this is a terminal status (no further transitions allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PipelineStatus::Completed | PipelineStatus::Failed | PipelineStatus::Cancelled
        )
    }
}

/// Status of a single step within a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Step has not been reached yet
    Pending,
    /// Step is currently executing
    Processing,
    /// Step finished successfully
    Completed,
    /// Step failed
    Failed,
    /// Step was skipped (e.g. its service is disabled)
    Skipped,
}

impl StepStatus {
    /// Check if this is a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StepStatus::Completed | StepStatus::Failed | StepStatus::Skipped
        )
    }
}
