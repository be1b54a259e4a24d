//! Caller input validation
//!
//! All checks run before any pipeline state is created; a validation
//! failure never reaches the job store.

use thiserror::Error;
use uuid::Uuid;

/// Maximum accepted prompt length in characters
pub const MAX_PROMPT_LEN: usize = 1000;

/// Error types for malformed caller input
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid {field} format: {value}")]
    InvalidId { field: &'static str, value: String },

    #[error("video URL cannot be empty")]
    EmptyVideoUrl,

    #[error("video URL must be a valid HTTP/HTTPS URL")]
    InvalidVideoUrl,

    #[error("prompt cannot be empty")]
    EmptyPrompt,

    #[error("prompt too long (max {MAX_PROMPT_LEN} characters)")]
    PromptTooLong,

    #[error("invalid pipeline config: {0}")]
    InvalidConfig(String),
}

/// Validate that an identifier is a well-formed UUID
pub fn validate_id(value: &str, field: &'static str) -> Result<(), ValidationError> {
    Uuid::parse_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidId {
            field,
            value: value.to_string(),
        })
}

/// Validate a video source URL
///
/// Only the scheme is checked; URLs without a recognizable video file
/// extension are accepted (CDN URLs often have none).
pub fn validate_video_url(url: &str) -> Result<(), ValidationError> {
    if url.is_empty() {
        return Err(ValidationError::EmptyVideoUrl);
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ValidationError::InvalidVideoUrl);
    }
    Ok(())
}

/// Validate a pipeline prompt
pub fn validate_prompt(prompt: &str) -> Result<(), ValidationError> {
    if prompt.trim().is_empty() {
        return Err(ValidationError::EmptyPrompt);
    }
    if prompt.chars().count() > MAX_PROMPT_LEN {
        return Err(ValidationError::PromptTooLong);
    }
    Ok(())
}
