use crate::e2e::helpers;

use helpers::NoCredentialContext;
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;

#[test_context(NoCredentialContext)]
#[tokio::test]
async fn it_should_halt_page_without_input_controls(ctx: &NoCredentialContext) {
    ctx.client
        .get("/")
        .await
        .unwrap()
        .assert_status(StatusCode::SERVICE_UNAVAILABLE)
        .assert_contains("OpenAI API key not found")
        .assert_not_contains("<textarea")
        .assert_not_contains("<form");
}

#[test_context(NoCredentialContext)]
#[tokio::test]
async fn it_should_halt_form_submissions(ctx: &NoCredentialContext) {
    ctx.client
        .submit("Hello", "coral", "")
        .await
        .unwrap()
        .assert_status(StatusCode::SERVICE_UNAVAILABLE)
        .assert_contains("OpenAI API key not found")
        .assert_not_contains("<audio");
}

#[test_context(NoCredentialContext)]
#[tokio::test]
async fn it_should_reject_api_calls(ctx: &NoCredentialContext) {
    ctx.client
        .post("/api/speech", &json!({ "text": "Hello" }))
        .await
        .unwrap()
        .assert_status(StatusCode::SERVICE_UNAVAILABLE)
        .assert_error_message("OPENAI_API_KEY");
}

#[test_context(NoCredentialContext)]
#[tokio::test]
async fn it_should_report_not_ready(ctx: &NoCredentialContext) {
    ctx.client
        .get("/health")
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let response = ctx.client.get("/health/ready").await.unwrap();
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("not_ready"));
    assert_eq!(
        body.get("tts").and_then(|v| v.as_str()),
        Some("missing_credential")
    );
}
