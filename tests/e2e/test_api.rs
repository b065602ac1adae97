use crate::e2e::helpers;

use helpers::openai_mock::FAKE_AUDIO;
use helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_synthesize_text_to_speech(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/speech",
            &json!({
                "text": "Hello, this is a test message for text to speech."
            }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/mpeg")
        .assert_header("x-voice-used", "coral")
        .assert_header("x-character-count", "49");
    assert_eq!(response.body_bytes, FAKE_AUDIO);

    let calls = ctx.openai.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].payload.get("instructions").is_none());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_use_requested_voice_and_instructions(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/speech",
            &json!({
                "text": "Welcome aboard",
                "voice": "shimmer",
                "instructions": "Calm and gentle"
            }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("x-voice-used", "shimmer");

    let calls = ctx.openai.calls();
    let payload = &calls[0].payload;
    assert_eq!(payload["voice"], "shimmer");
    assert_eq!(payload["instructions"], "Calm and gentle");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_blank_text(ctx: &TestContext) {
    ctx.client
        .post("/api/speech", &json!({ "text": "   " }))
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("text cannot be empty");

    assert_eq!(ctx.openai.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_voice(ctx: &TestContext) {
    ctx.client
        .post("/api/speech", &json!({ "text": "Hello", "voice": "Coral" }))
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("unknown voice: Coral");

    assert_eq!(ctx.openai.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_map_provider_failure_to_bad_gateway(ctx: &TestContext) {
    ctx.openai
        .fail_next(StatusCode::UNAUTHORIZED, "Incorrect API key provided");

    ctx.client
        .post("/api/speech", &json!({ "text": "Hello" }))
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("authentication failed: Incorrect API key provided");

    // No automatic retry
    assert_eq!(ctx.openai.call_count(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_share_state_with_the_page(ctx: &TestContext) {
    ctx.client
        .post("/api/speech", &json!({ "text": "Hello" }))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    ctx.client
        .get("/download")
        .await
        .unwrap()
        .assert_status(StatusCode::NOT_FOUND);
}
