//! Pipeline configuration supplied by the caller

use crate::core::validate::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Flags selecting which steps a pipeline is built with, plus any
/// caller-defined custom steps.
///
/// Deserializes from the caller's JSON with camelCase keys; unknown keys
/// are rejected so configuration typos surface as validation errors
/// instead of silently dropped steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct PipelineConfig {
    /// Enable the generative video transform step
    pub enable_runway_video: bool,

    /// Enable the media post-processing step
    pub enable_ffmpeg: bool,

    /// Enable the transcription step
    pub enable_whisper: bool,

    /// Enable the content analysis step
    pub enable_gpt4: bool,

    /// Custom steps appended after the built-in ones; each entry becomes
    /// one step's input payload verbatim
    pub custom_steps: Vec<Map<String, Value>>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            enable_runway_video: true,
            enable_ffmpeg: false,
            enable_whisper: false,
            enable_gpt4: false,
            custom_steps: Vec::new(),
        }
    }
}

impl PipelineConfig {
    /// Parse a configuration from a raw JSON value
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        serde_json::from_value(value)
            .map_err(|e| ValidationError::InvalidConfig(e.to_string()))
    }
}
