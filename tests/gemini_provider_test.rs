// HTTP-level tests for the Gemini provider against a mock server

use solace::providers::{GeminiProvider, GenerationRequest, TextGenerator};

fn provider_for(server: &mockito::ServerGuard) -> GeminiProvider {
    GeminiProvider::new("test-key".to_string())
        .unwrap()
        .with_model("gemini-2.0-flash")
        .with_base_url(server.url())
}

#[tokio::test]
async fn test_generate_returns_candidate_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock(
            "POST",
            "/v1beta/models/gemini-2.0-flash:generateContent?key=test-key",
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"candidates":[{"content":{"parts":[{"text":"I'm here with you."}]}}]}"#,
        )
        .create_async()
        .await;

    let provider = provider_for(&server);
    let reply = provider
        .generate(&GenerationRequest::new("hello"))
        .await
        .unwrap();

    assert_eq!(reply, "I'm here with you.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_generate_propagates_api_errors() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock(
            "POST",
            "/v1beta/models/gemini-2.0-flash:generateContent?key=test-key",
        )
        .with_status(429)
        .with_body(r#"{"error": {"message": "quota exceeded"}}"#)
        .create_async()
        .await;

    let provider = provider_for(&server);
    let result = provider.generate(&GenerationRequest::new("hello")).await;

    let err = result.unwrap_err().to_string();
    assert!(err.contains("429"), "error was: {}", err);
}

#[tokio::test]
async fn test_generate_rejects_empty_candidates() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock(
            "POST",
            "/v1beta/models/gemini-2.0-flash:generateContent?key=test-key",
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates":[]}"#)
        .create_async()
        .await;

    let provider = provider_for(&server);
    let result = provider.generate(&GenerationRequest::new("hello")).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_generate_rejects_malformed_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock(
            "POST",
            "/v1beta/models/gemini-2.0-flash:generateContent?key=test-key",
        )
        .with_status(200)
        .with_body("not json at all")
        .create_async()
        .await;

    let provider = provider_for(&server);
    let result = provider.generate(&GenerationRequest::new("hello")).await;

    assert!(result.is_err());
}
