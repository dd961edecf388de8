//! Integration tests for the inspection flow.

#![allow(clippy::unwrap_used, clippy::panic)]

use assert_fs::prelude::*;
use vigil::prelude::*;
use vigil::providers::MockModel;

/// PNG signature followed by two filler bytes; enough for an encode test.
const PNG_BYTES: [u8; 10] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00];

#[tokio::test]
async fn encode_build_and_generate_through_mock_backend() {
    let file = assert_fs::NamedTempFile::new("danger_zone.png").unwrap();
    file.write_binary(&PNG_BYTES).unwrap();

    let image = EncodedImage::load(file.path()).await.unwrap();
    assert!(image.as_str().starts_with("data:image/png;base64,"));

    let messages = InspectionTask::DangerZoneIntrusion.conversation(&image);
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, MessageRole::System);
    assert_eq!(messages[1].role, MessageRole::User);

    let model = MockModel::new(vec!["ok".to_string()]).with_model_id("qwen3-vl-plus");
    assert_eq!(model.model_id(), "qwen3-vl-plus");

    let response = model
        .generate(messages, GenerateOptions::default())
        .await
        .unwrap();
    assert_eq!(response.text(), Some("ok"));
}

#[tokio::test]
async fn missing_image_fails_before_any_request_is_built() {
    let err = EncodedImage::load("vl_demo/area_intrusion.webp")
        .await
        .unwrap_err();
    match err {
        EncodeError::FileNotFound { path } => {
            assert!(path.to_string_lossy().contains("area_intrusion.webp"));
        }
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

#[test]
fn every_task_has_a_distinct_bracketed_verdict_prompt() {
    let mut prompts = std::collections::HashSet::new();
    for task in InspectionTask::ALL {
        let prompt = task.system_prompt();
        assert!(prompt.contains('['), "{task} prompt pins no verdict marker");
        assert!(prompts.insert(prompt), "{task} prompt duplicated");
    }
}
