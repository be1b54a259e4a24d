//! Test: Creation - step-list composition and input validation

use crate::helpers::*;
use serde_json::json;
use vidpipe::{PipelineConfig, PipelineStatus, StepStatus, StepType, ValidationError};

/// A config enabling only the primary transform yields exactly one step
#[tokio::test]
async fn test_single_primary_transform_step() {
    let manager = manager_without_executors();

    let config = config_enabling(&[StepType::PrimaryTransform]);
    let pipeline = manager
        .create(VIDEO_ID, VIDEO_URL, "make it rain", Some(config))
        .unwrap();

    assert_eq!(pipeline.total_steps, 1);
    assert_eq!(pipeline.steps[0].step_type, StepType::PrimaryTransform);
    assert_eq!(pipeline.steps[0].order, 0);
    assert_eq!(pipeline.status, PipelineStatus::Pending);
    assert_eq!(pipeline.completed_steps, 0);
}

/// Omitting the config enables only the primary transform
#[tokio::test]
async fn test_default_config() {
    let manager = manager_without_executors();

    let pipeline = manager.create(VIDEO_ID, VIDEO_URL, "prompt", None).unwrap();

    assert_eq!(pipeline.total_steps, 1);
    assert_eq!(pipeline.steps[0].step_type, StepType::PrimaryTransform);
}

/// Custom step entries become step inputs verbatim
#[tokio::test]
async fn test_custom_steps_carry_input() {
    let manager = manager_without_executors();

    let config = PipelineConfig::from_value(json!({
        "enableRunwayVideo": true,
        "customSteps": [{"type": "resize"}]
    }))
    .unwrap();
    let pipeline = manager
        .create(VIDEO_ID, VIDEO_URL, "prompt", Some(config))
        .unwrap();

    assert_eq!(pipeline.total_steps, 2);
    assert_eq!(pipeline.steps[1].step_type, StepType::Custom);
    assert_eq!(pipeline.steps[1].input["type"], json!("resize"));
    assert_eq!(pipeline.steps[1].order, 1);
}

/// Total steps equals enabled flags plus custom entries, in fixed precedence
#[tokio::test]
async fn test_all_flags_and_custom_steps() {
    let manager = manager_without_executors();

    let config = PipelineConfig::from_value(json!({
        "enableRunwayVideo": true,
        "enableFfmpeg": true,
        "enableWhisper": true,
        "enableGpt4": true,
        "customSteps": [{"a": 1}, {"b": 2}]
    }))
    .unwrap();
    let pipeline = manager
        .create(VIDEO_ID, VIDEO_URL, "prompt", Some(config))
        .unwrap();

    assert_eq!(pipeline.total_steps, 6);
    let types: Vec<StepType> = pipeline.steps.iter().map(|s| s.step_type).collect();
    assert_eq!(
        types,
        vec![
            StepType::PrimaryTransform,
            StepType::MediaProcess,
            StepType::Transcribe,
            StepType::ContentAnalyze,
            StepType::Custom,
            StepType::Custom,
        ]
    );
    for (i, step) in pipeline.steps.iter().enumerate() {
        assert_eq!(step.order, i);
        assert_eq!(step.status, StepStatus::Pending);
    }
}

/// Unknown configuration keys are rejected before any state is created
#[tokio::test]
async fn test_unknown_config_key_rejected() {
    let manager = manager_without_executors();

    let err = PipelineConfig::from_value(json!({"enableRunway": true})).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidConfig(_)));

    // nothing was registered
    assert!(manager.list().is_empty());
}

/// Malformed caller input never reaches the store
#[tokio::test]
async fn test_validation_failures_leave_store_empty() {
    let manager = manager_without_executors();

    assert!(matches!(
        manager.create("not-a-uuid", VIDEO_URL, "prompt", None),
        Err(ValidationError::InvalidId { .. })
    ));
    assert!(matches!(
        manager.create(VIDEO_ID, "ftp://x/in.mp4", "prompt", None),
        Err(ValidationError::InvalidVideoUrl)
    ));
    assert!(matches!(
        manager.create(VIDEO_ID, VIDEO_URL, "  ", None),
        Err(ValidationError::EmptyPrompt)
    ));
    assert!(matches!(
        manager.create(VIDEO_ID, VIDEO_URL, &"x".repeat(2000), None),
        Err(ValidationError::PromptTooLong)
    ));

    assert!(manager.list().is_empty());
}

/// find_by_video resolves the pipeline created for a video id
#[tokio::test]
async fn test_find_by_video() {
    let manager = manager_without_executors();

    let pipeline = manager.create(VIDEO_ID, VIDEO_URL, "prompt", None).unwrap();

    let found = manager.find_by_video(VIDEO_ID).unwrap();
    assert_eq!(found.pipeline_id, pipeline.pipeline_id);
    assert!(manager.find_by_video("other").is_none());
}

/// The manager performs no deduplication by video id
#[tokio::test]
async fn test_create_does_not_deduplicate() {
    let manager = manager_without_executors();

    let first = manager.create(VIDEO_ID, VIDEO_URL, "prompt", None).unwrap();
    let second = manager.create(VIDEO_ID, VIDEO_URL, "prompt", None).unwrap();

    assert_ne!(first.pipeline_id, second.pipeline_id);
    assert_eq!(manager.list().len(), 2);
}
