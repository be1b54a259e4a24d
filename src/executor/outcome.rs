//! Step outcome and service error types

use serde_json::{Map, Value};
use thiserror::Error;

/// Error types for delegated step work
///
/// Any error returned by an executor is recorded as the step's failure;
/// `Other` lets collaborator implementations propagate arbitrary failures
/// with `?`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Failed(String),

    #[error("timeout after {0} seconds")]
    Timeout(u64),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Successful result of a step execution
#[derive(Debug, Clone)]
pub enum StepOutcome {
    /// The step did its work and produced an output payload
    Completed {
        output: Map<String, Value>,
    },
    /// The step was deliberately not performed
    Skipped {
        reason: String,
    },
}

impl StepOutcome {
    /// Build a completed outcome from key/value pairs
    pub fn completed(output: Map<String, Value>) -> Self {
        StepOutcome::Completed { output }
    }

    /// Build a skipped outcome with the given reason
    pub fn skipped(reason: impl Into<String>) -> Self {
        StepOutcome::Skipped {
            reason: reason.into(),
        }
    }
}
