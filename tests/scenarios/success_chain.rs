//! Test: Success chain - sequential execution through to completion

use crate::helpers::*;
use serde_json::json;
use std::sync::Arc;
use vidpipe::{ExecutorRegistry, PipelineManager, PipelineStatus, StepType};

/// A single successful step completes the pipeline with its output recorded
#[tokio::test]
async fn test_single_step_success() {
    let executor = MockExecutor::new(vec![success_with("video_url", json!("https://x/out.mp4"))]);
    let manager = manager_with(&[StepType::PrimaryTransform], Arc::new(executor));

    let pipeline = manager.create(VIDEO_ID, VIDEO_URL, "prompt", None).unwrap();
    let id = pipeline.pipeline_id;
    manager.start(id).unwrap();

    let finished = wait_for_status(&manager, id, PipelineStatus::Completed).await;

    assert_eq!(finished.completed_steps, 1);
    assert_step_completed(&finished, 0);
    assert_eq!(
        finished.steps[0].output.as_ref().unwrap()["video_url"],
        json!("https://x/out.mp4")
    );
    assert!(finished.completed_at.is_some());
    assert!(finished.updated_at.is_some());
}

/// Steps run strictly in order and every output lands on its own step
#[tokio::test]
async fn test_multi_step_chain() {
    let executor = MockExecutor::new(vec![
        success_with("n", json!(1)),
        success_with("n", json!(2)),
        success_with("n", json!(3)),
    ]);
    let manager = manager_with(
        &[
            StepType::PrimaryTransform,
            StepType::MediaProcess,
            StepType::Transcribe,
        ],
        Arc::new(executor),
    );

    let config = config_enabling(&[
        StepType::PrimaryTransform,
        StepType::MediaProcess,
        StepType::Transcribe,
    ]);
    let pipeline = manager
        .create(VIDEO_ID, VIDEO_URL, "prompt", Some(config))
        .unwrap();
    manager.start(pipeline.pipeline_id).unwrap();

    let finished =
        wait_for_status(&manager, pipeline.pipeline_id, PipelineStatus::Completed).await;

    assert_eq!(finished.completed_steps, 3);
    for (i, step) in finished.steps.iter().enumerate() {
        assert_eq!(step.output.as_ref().unwrap()["n"], json!(i + 1));
    }
}

/// A pipeline with no steps completes as soon as it starts
#[tokio::test]
async fn test_zero_step_pipeline_completes() {
    let manager = manager_without_executors();

    let config = config_enabling(&[]);
    let pipeline = manager
        .create(VIDEO_ID, VIDEO_URL, "prompt", Some(config))
        .unwrap();
    manager.start(pipeline.pipeline_id).unwrap();

    let finished =
        wait_for_status(&manager, pipeline.pipeline_id, PipelineStatus::Completed).await;
    assert_eq!(finished.total_steps, 0);
    assert_eq!(finished.completed_steps, 0);
}

/// The built-in custom executor echoes each step's input payload
#[tokio::test]
async fn test_custom_steps_with_default_registry() {
    let manager = PipelineManager::new(Arc::new(ExecutorRegistry::with_defaults()));

    let config = vidpipe::PipelineConfig::from_value(json!({
        "enableRunwayVideo": false,
        "customSteps": [{"type": "resize", "width": 640}]
    }))
    .unwrap();
    let pipeline = manager
        .create(VIDEO_ID, VIDEO_URL, "prompt", Some(config))
        .unwrap();
    manager.start(pipeline.pipeline_id).unwrap();

    let finished =
        wait_for_status(&manager, pipeline.pipeline_id, PipelineStatus::Completed).await;

    assert_eq!(finished.completed_steps, 1);
    let output = finished.steps[0].output.as_ref().unwrap();
    assert_eq!(output["step_data"]["type"], json!("resize"));
    assert_eq!(output["step_data"]["width"], json!(640));
}

/// completed_steps never exceeds total_steps along the way
#[tokio::test]
async fn test_progress_counters_stay_consistent() {
    let executor = MockExecutor::new(vec![
        success_with("n", json!(1)),
        success_with("n", json!(2)),
    ]);
    let manager = manager_with(
        &[StepType::PrimaryTransform, StepType::MediaProcess],
        Arc::new(executor),
    );

    let config = config_enabling(&[StepType::PrimaryTransform, StepType::MediaProcess]);
    let pipeline = manager
        .create(VIDEO_ID, VIDEO_URL, "prompt", Some(config))
        .unwrap();
    let id = pipeline.pipeline_id;
    manager.start(id).unwrap();

    loop {
        let snapshot = manager.get(id).unwrap();
        assert!(snapshot.completed_steps <= snapshot.total_steps);
        if snapshot.status == PipelineStatus::Completed {
            assert_eq!(snapshot.completed_steps, 2);
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(1)).await;
    }
}
