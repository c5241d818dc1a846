// OpenAI-compatible client tests against a local mock server

mod support;

use mcp_tool_bridge::domain::function::{ModelResponse, ToolCallRequest};
use mcp_tool_bridge::invoker::{ModelInvocationError, ModelInvoker};
use mcp_tool_bridge::model::{ModelBackend, ModelError};
use mcp_tool_bridge::schema::translate_all;
use mcp_tool_bridge::{ModelSettings, OpenAIClient, PromptSettings};
use mockito::{Matcher, Server};
use serde_json::json;
use support::add_numbers_tool;

const CHAT_PATH: &str = "/v1/chat/completions";

fn settings_for(url: &str) -> ModelSettings {
    ModelSettings::new("gpt-4o-mini", url)
        .with_credential("sk-test")
        .with_sampling(0.5, 1.0, 256)
}

fn invoker_for(settings: ModelSettings) -> ModelInvoker<OpenAIClient> {
    let client = OpenAIClient::from_settings(&settings);
    ModelInvoker::new(client, settings, &PromptSettings::default())
}

#[tokio::test]
async fn sends_sampling_options_and_functions_and_parses_tool_calls() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", CHAT_PATH)
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({
                "model": "gpt-4o-mini",
                "temperature": 0.5,
                "top_p": 1.0,
                "max_tokens": 256,
                "stream": false
            })),
            Matcher::Regex(
                r#""tools":\[\{"type":"function","function":\{"name":"add_numbers""#.to_string(),
            ),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": null,
                        "tool_calls": [{
                            "id": "call_abc",
                            "type": "function",
                            "function": { "name": "add_numbers", "arguments": "{\"a\":20,\"b\":5}" }
                        }]
                    }
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let (functions, rejected) = translate_all(&[add_numbers_tool()]);
    assert!(rejected.is_empty());

    let response = invoker_for(settings_for(&server.url()))
        .invoke("Calculate the sum of 20 and 5.", &functions)
        .await
        .expect("model answers");

    mock.assert_async().await;
    assert_eq!(
        response,
        ModelResponse::ToolCalls(vec![
            ToolCallRequest::new("add_numbers", r#"{"a":20,"b":5}"#).with_id("call_abc")
        ])
    );
}

#[tokio::test]
async fn content_reply_is_terminal() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", CHAT_PATH)
        .match_body(Matcher::PartialJson(json!({
            "messages": [
                { "role": "system", "content": PromptSettings::default().system },
                { "role": "user", "content": "hello" }
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Hi there"}}]}"#)
        .create_async()
        .await;

    let response = invoker_for(settings_for(&server.url()))
        .invoke("hello", &[])
        .await
        .expect("model answers");

    mock.assert_async().await;
    assert_eq!(response, ModelResponse::Content("Hi there".into()));
}

#[tokio::test]
async fn rejected_credential_surfaces_as_network_error_with_status() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", CHAT_PATH)
        .with_status(401)
        .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
        .create_async()
        .await;

    let err = invoker_for(settings_for(&server.url()))
        .invoke("hello", &[])
        .await
        .expect_err("401 fails");

    match err {
        ModelInvocationError::Backend(ModelError::Network { ref source, .. }) => {
            assert_eq!(source.status().map(|status| status.as_u16()), Some(401));
        }
        other => panic!("expected network error, got {other:?}"),
    }
    assert_eq!(
        err.user_message(),
        "Provider 'openai' rejected the credential."
    );
}

#[tokio::test]
async fn empty_choices_are_an_invalid_response() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", CHAT_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let err = invoker_for(settings_for(&server.url()))
        .invoke("hello", &[])
        .await
        .expect_err("no choices");

    assert!(matches!(
        err,
        ModelInvocationError::Backend(ModelError::InvalidResponse { .. })
    ));
}

#[tokio::test]
async fn garbage_body_is_an_invalid_response() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", CHAT_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("not json at all")
        .create_async()
        .await;

    let err = invoker_for(settings_for(&server.url()))
        .invoke("hello", &[])
        .await
        .expect_err("undecodable");

    assert!(matches!(
        err,
        ModelInvocationError::Backend(ModelError::InvalidResponse { .. })
    ));
}

#[tokio::test]
async fn missing_credential_fails_before_any_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", CHAT_PATH)
        .expect(0)
        .create_async()
        .await;

    let settings = ModelSettings::new("gpt-4o-mini", server.url());
    let client = OpenAIClient::from_settings(&settings);
    assert_eq!(client.id(), "openai");

    let err = ModelInvoker::new(client, settings, &PromptSettings::default())
        .invoke("hello", &[])
        .await
        .expect_err("no key");

    mock.assert_async().await;
    assert!(matches!(
        err,
        ModelInvocationError::Backend(ModelError::MissingApiKey { .. })
    ));
}

#[tokio::test]
async fn custom_api_path_is_honoured() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/openai/v1/chat")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"message":{"content":"ok"}}]}"#)
        .create_async()
        .await;

    let mut settings = settings_for(&format!("{}/", server.url()));
    settings.api_path = "/openai/v1/chat".to_string();

    let response = invoker_for(settings)
        .invoke("hello", &[])
        .await
        .expect("model answers");

    mock.assert_async().await;
    assert_eq!(response, ModelResponse::Content("ok".into()));
}

#[tokio::test]
async fn empty_tool_call_list_beside_a_stopped_answer_is_content() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", CHAT_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"choices":[{"finish_reason":"stop","message":{"role":"assistant","content":"20 + 5 = 25","tool_calls":[]}}]}"#,
        )
        .create_async()
        .await;

    let response = invoker_for(settings_for(&server.url()))
        .invoke("hello", &[])
        .await
        .expect("plain answer is accepted");

    mock.assert_async().await;
    assert_eq!(response, ModelResponse::Content("20 + 5 = 25".into()));
}

#[tokio::test]
async fn tool_call_finish_without_calls_is_malformed() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", CHAT_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"choices":[{"finish_reason":"tool_calls","message":{"role":"assistant","content":"","tool_calls":[]}}]}"#,
        )
        .create_async()
        .await;

    let err = invoker_for(settings_for(&server.url()))
        .invoke("hello", &[])
        .await
        .expect_err("intent without calls");

    assert!(matches!(err, ModelInvocationError::EmptyToolCalls { .. }));
}
