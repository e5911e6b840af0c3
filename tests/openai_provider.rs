use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nutrition_assistant::config::ProviderConfig;
use nutrition_assistant::llm::Capability;
use nutrition_assistant::providers::{ChatMessage, ChatReply, CompletionProvider, OpenAIProvider};

async fn provider_for(server: &MockServer) -> OpenAIProvider {
    let config = ProviderConfig {
        provider: "openai".to_string(),
        model: "gpt-3.5-turbo".to_string(),
        api_url: format!("{}/v1/chat/completions", server.uri()),
        temperature: 0.7,
    };
    OpenAIProvider::new(config, "sk-test".to_string(), "You are a helpful assistant.".to_string())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_complete_returns_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo",
            "messages": [
                {"role": "system", "content": "You are a helpful assistant."},
                {"role": "user", "content": "hello"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "Hi there!"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = provider_for(&server).await.complete("hello").await.unwrap();
    assert_eq!(text, "Hi there!");
}

#[tokio::test]
async fn test_chat_with_functions_returns_function_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({"function_call": "auto"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": null,
                    "function_call": {"name": "get_nutritional_info", "arguments": "{\"food_item\": \"apple\"}"}
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = provider_for(&server)
        .await
        .chat(&[ChatMessage::user("How many calories in an apple?")], &Capability::specs())
        .await
        .unwrap();

    match reply {
        ChatReply::FunctionCall(call) => {
            assert_eq!(call.name, "get_nutritional_info");
            assert_eq!(call.arguments, "{\"food_item\": \"apple\"}");
        }
        other => panic!("expected function call, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let err = provider_for(&server).await.complete("hello").await.unwrap_err();
    assert!(err.to_string().contains("429"));
    assert!(err.to_string().contains("rate limited"));
}

#[tokio::test]
async fn test_missing_api_key_is_rejected() {
    let config = ProviderConfig::from_env("openai");
    let result = OpenAIProvider::new(config, String::new(), String::new()).await;
    assert!(result.is_err());
}
