use crate::e2e::helpers;

use helpers::openai_mock::{MockReply, FAKE_AUDIO};
use helpers::TestContext;
use hyper::StatusCode;
use test_context::test_context;

fn assert_speech_file_name(disposition: &str, kind: &str) {
    let prefix = format!("{}; filename=\"speech_", kind);
    assert!(
        disposition.starts_with(&prefix),
        "Unexpected disposition: {}",
        disposition
    );
    let timestamp = disposition
        .trim_start_matches(&prefix)
        .trim_end_matches(".mp3\"");
    assert!(
        !timestamp.is_empty() && timestamp.chars().all(|c| c.is_ascii_digit()),
        "File name should carry a unix timestamp: {}",
        disposition
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_before_any_generation(ctx: &TestContext) {
    ctx.client
        .get("/audio")
        .await
        .unwrap()
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("No audio has been generated");

    ctx.client
        .get("/download")
        .await
        .unwrap()
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_download_cached_audio(ctx: &TestContext) {
    ctx.client.submit("Hello world", "coral", "").await.unwrap();

    let response = ctx.client.get("/download").await.unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/mpeg");
    assert_eq!(response.body_bytes, FAKE_AUDIO);
    assert_speech_file_name(
        response.header("content-disposition").unwrap(),
        "attachment",
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_cached_audio_inline_for_the_player(ctx: &TestContext) {
    ctx.client.submit("Hello world", "coral", "").await.unwrap();

    let response = ctx.client.get("/audio").await.unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/mpeg")
        .assert_header("cache-control", "no-store");
    assert_eq!(response.body_bytes, FAKE_AUDIO);
    assert_speech_file_name(response.header("content-disposition").unwrap(), "inline");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_the_latest_result_after_regeneration(ctx: &TestContext) {
    ctx.openai.push_reply(MockReply::Audio(b"first".to_vec()));
    ctx.openai.push_reply(MockReply::Audio(b"second".to_vec()));

    ctx.client.submit("One", "coral", "").await.unwrap();
    ctx.client.submit("Two", "coral", "").await.unwrap();

    let response = ctx.client.get("/download").await.unwrap();
    assert_eq!(response.body_bytes, b"second");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_link_download_name_on_the_page(ctx: &TestContext) {
    let page = ctx.client.submit("Hello", "coral", "").await.unwrap();
    let download = ctx.client.get("/download").await.unwrap();

    let disposition = download.header("content-disposition").unwrap();
    let file_name = disposition
        .trim_start_matches("attachment; filename=\"")
        .trim_end_matches('"');
    page.assert_contains(&format!(r#"download="{}""#, file_name));
}
