//! Step domain model

use crate::core::status::StepStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// The kind of work a step performs
///
/// Each type maps to one executor capability in the registry; the wire
/// names are what callers see in serialized pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepType {
    /// Generative video transformation of the source material
    PrimaryTransform,
    /// Media post-processing (transcoding, filtering)
    MediaProcess,
    /// Audio transcription
    Transcribe,
    /// Content analysis of the transcript/media
    ContentAnalyze,
    /// Caller-defined step carrying an opaque payload
    Custom,
}

impl StepType {
    /// Wire name of this step type
    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::PrimaryTransform => "primary-transform",
            StepType::MediaProcess => "media-process",
            StepType::Transcribe => "transcribe",
            StepType::ContentAnalyze => "content-analyze",
            StepType::Custom => "custom",
        }
    }
}

impl std::fmt::Display for StepType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single step in a pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStep {
    /// Unique step identifier
    pub step_id: Uuid,

    /// What kind of work this step performs
    pub step_type: StepType,

    /// Current lifecycle status
    pub status: StepStatus,

    /// Position in the pipeline's step sequence (0-based, gap-free)
    pub order: usize,

    /// Input payload handed to the executor
    pub input: Map<String, Value>,

    /// Output payload, set only when the step completes successfully
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Map<String, Value>>,

    /// Error message (failure) or skip reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// When execution of this step began
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    /// When execution of this step finished, whatever the outcome
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    /// Progress percentage (0-100)
    pub progress: u8,
}

impl PipelineStep {
    /// Create a new pending step at the given position
    pub fn new(step_type: StepType, order: usize, input: Map<String, Value>) -> Self {
        Self {
            step_id: Uuid::new_v4(),
            step_type,
            status: StepStatus::Pending,
            order,
            input,
            output: None,
            error: None,
            started_at: None,
            completed_at: None,
            progress: 0,
        }
    }
}
