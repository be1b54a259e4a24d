//! Pipeline domain model

use crate::core::{
    config::PipelineConfig,
    status::PipelineStatus,
    step::{PipelineStep, StepType},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Map;
use uuid::Uuid;

/// One multi-step processing job tracked by the orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    /// Unique pipeline identifier
    pub pipeline_id: Uuid,

    /// The video this pipeline processes
    pub video_id: String,

    /// Source material URL
    pub video_url: String,

    /// Free-text prompt handed to the executors
    pub prompt: String,

    /// Current lifecycle status
    pub status: PipelineStatus,

    /// Steps in execution order
    pub steps: Vec<PipelineStep>,

    /// When the pipeline was created
    pub created_at: DateTime<Utc>,

    /// Last mutation of any pipeline or step field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// When the pipeline reached a terminal status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    /// Number of steps, fixed at creation
    pub total_steps: usize,

    /// Number of successfully completed steps
    pub completed_steps: usize,
}

impl Pipeline {
    /// Create a new pending pipeline with its step list built from `config`
    ///
    /// Built-in steps are composed in fixed precedence order, followed by
    /// one custom step per `custom_steps` entry.
    pub fn new(
        video_id: impl Into<String>,
        video_url: impl Into<String>,
        prompt: impl Into<String>,
        config: &PipelineConfig,
    ) -> Self {
        let steps = Self::build_steps(config);

        Pipeline {
            pipeline_id: Uuid::new_v4(),
            video_id: video_id.into(),
            video_url: video_url.into(),
            prompt: prompt.into(),
            status: PipelineStatus::Pending,
            total_steps: steps.len(),
            steps,
            created_at: Utc::now(),
            updated_at: None,
            completed_at: None,
            completed_steps: 0,
        }
    }

    /// Compose the step list from configuration flags
    fn build_steps(config: &PipelineConfig) -> Vec<PipelineStep> {
        let enabled = [
            (config.enable_runway_video, StepType::PrimaryTransform),
            (config.enable_ffmpeg, StepType::MediaProcess),
            (config.enable_whisper, StepType::Transcribe),
            (config.enable_gpt4, StepType::ContentAnalyze),
        ];

        let mut steps = Vec::new();
        for (flag, step_type) in enabled {
            if flag {
                steps.push(PipelineStep::new(step_type, steps.len(), Map::new()));
            }
        }

        for entry in &config.custom_steps {
            steps.push(PipelineStep::new(StepType::Custom, steps.len(), entry.clone()));
        }

        steps
    }

    /// Get a step by its position
    pub fn step(&self, order: usize) -> Option<&PipelineStep> {
        self.steps.get(order)
    }

    /// Check if the pipeline has reached a terminal status
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Fraction of steps successfully completed (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        if self.total_steps == 0 {
            return 0.0;
        }
        self.completed_steps as f64 / self.total_steps as f64
    }
}
