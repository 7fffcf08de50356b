use serde_json::{json, Value};
use std::sync::Arc;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use teachassist::assessment::{AssessmentResult, YearLevel};
use teachassist::config::{Config, ProviderConfig};
use teachassist::kind::AssistantKind;
use teachassist::providers::{ImageInput, Message, OpenRouterProvider, Provider};
use teachassist::session::SessionManager;
use teachassist::storage::MemoryStore;
use teachassist::TeachAssistError;

fn provider_for(server: &MockServer) -> OpenRouterProvider {
    let config = ProviderConfig {
        api_base: format!("{}/api/v1", server.uri()),
        model: "test/model".to_string(),
        api_key: Some("sk-test".to_string()),
        timeout_seconds: 5,
    };
    OpenRouterProvider::new(config).unwrap()
}

fn completion(content: &str) -> Value {
    json!({
        "id": "gen-1",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

async fn request_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    serde_json::from_slice(&requests[0].body).unwrap()
}

fn generation_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<TeachAssistError>() {
        Some(TeachAssistError::Generation { message }) => message.clone(),
        other => panic!("expected generation failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_complete_sends_system_prompt_first() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("A fine report")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let text = provider
        .complete(
            "You write reports.",
            &[
                Message::system("stale prompt"),
                Message::user("notes"),
                Message::assistant("draft"),
                Message::user("shorter"),
            ],
        )
        .await
        .unwrap();
    assert_eq!(text, "A fine report");

    let body = request_body(&server).await;
    assert_eq!(body["model"], "test/model");
    assert_eq!(
        body["messages"],
        json!([
            { "role": "system", "content": "You write reports." },
            { "role": "user", "content": "notes" },
            { "role": "assistant", "content": "draft" },
            { "role": "user", "content": "shorter" }
        ])
    );
}

#[tokio::test]
async fn test_error_body_detail_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "Rate limit exceeded", "code": 429 }
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete("prompt", &[Message::user("notes")])
        .await
        .unwrap_err();
    let message = generation_message(&err);
    assert!(message.contains("Rate limit exceeded"));
    assert!(message.contains("429"));
}

#[tokio::test]
async fn test_plain_string_error_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "Model not found" })),
        )
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete("prompt", &[Message::user("notes")])
        .await
        .unwrap_err();
    assert!(generation_message(&err).starts_with("Model not found"));
}

#[tokio::test]
async fn test_error_without_detail_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad gateway</html>"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete("prompt", &[Message::user("notes")])
        .await
        .unwrap_err();
    assert!(generation_message(&err).contains("Failed to generate content from AI service"));
}

#[tokio::test]
async fn test_empty_choices_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete("prompt", &[Message::user("notes")])
        .await
        .unwrap_err();
    assert_eq!(generation_message(&err), "No content generated from AI service");
}

#[tokio::test]
async fn test_image_request_uses_content_parts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Neat work")))
        .mount(&server)
        .await;

    let image = ImageInput::new("image/png", vec![1, 2, 3]);
    let text = provider_for(&server)
        .complete_with_image("Assess handwriting.", "Year 2 sample", &image)
        .await
        .unwrap();
    assert_eq!(text, "Neat work");

    let body = request_body(&server).await;
    let user = &body["messages"][1];
    assert_eq!(user["role"], "user");
    assert_eq!(
        user["content"],
        json!([
            { "type": "text", "text": "Year 2 sample" },
            { "type": "image_url", "image_url": { "url": "data:image/png;base64,AQID" } }
        ])
    );
}

#[tokio::test]
async fn test_manager_over_http_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            r#"```json
{"assessments":[{"criterion":"Letter formation","percentage":82,"evidence":"Consistent shapes"}]}
```"#,
        )))
        .mount(&server)
        .await;

    let provider = Arc::new(provider_for(&server));
    let manager = SessionManager::new(provider, Arc::new(MemoryStore::new()), &Config::default());
    manager.activate(AssistantKind::WritingAssessment).await;

    let image = ImageInput::new("image/jpeg", vec![0xFF; 64]);
    let assessed = manager
        .assess(YearLevel::Foundation, &image)
        .await
        .unwrap()
        .applied()
        .unwrap();

    match assessed.result {
        AssessmentResult::Criteria(criteria) => {
            assert_eq!(criteria.len(), 1);
            assert_eq!(criteria[0].criterion, "Letter formation");
            assert_eq!(criteria[0].percentage, 82.0);
        }
        other => panic!("expected criteria, got {:?}", other),
    }

    let body = request_body(&server).await;
    let url = body["messages"][1]["content"][1]["image_url"]["url"]
        .as_str()
        .unwrap();
    assert!(url.starts_with("data:image/jpeg;base64,"));
}
