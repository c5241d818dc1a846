//! Scripted collaborators shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use mcp_tool_bridge::ProviderSession;
use mcp_tool_bridge::SessionError;
use mcp_tool_bridge::domain::capability::{
    ResourceContents, ResourceDescriptor, ToolCallResult, ToolDescriptor,
};
use mcp_tool_bridge::model::{Completion, CompletionRequest, ModelBackend, ModelError, RawToolCall};
use mcp_tool_bridge::{BridgeConfig, ModelSettings};
use serde_json::{Map as JsonMap, Value, json};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

pub type Arguments = JsonMap<String, Value>;
pub type ToolHandler = fn(&str, &Arguments) -> Result<ToolCallResult, SessionError>;

pub fn add_numbers_tool() -> ToolDescriptor {
    ToolDescriptor::new(
        "add_numbers",
        "Add two numbers from given arguments",
        json!({
            "type": "object",
            "properties": {
                "a": { "title": "A", "type": "integer" },
                "b": { "title": "B", "type": "integer" }
            },
            "required": ["a", "b"]
        }),
    )
}

pub fn echo_tool() -> ToolDescriptor {
    ToolDescriptor::new(
        "echo",
        "Echo the given text",
        json!({
            "type": "object",
            "properties": { "text": { "type": "string" } }
        }),
    )
}

/// Behaves like the demo provider: `add_numbers` sums, `echo` echoes,
/// anything else is rejected by the provider.
pub fn demo_handler(name: &str, arguments: &Arguments) -> Result<ToolCallResult, SessionError> {
    match name {
        "add_numbers" => {
            let a = arguments.get("a").and_then(Value::as_i64).unwrap_or(0);
            let b = arguments.get("b").and_then(Value::as_i64).unwrap_or(0);
            Ok(ToolCallResult::text((a + b).to_string()))
        }
        "echo" => {
            let text = arguments
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default();
            Ok(ToolCallResult::text(text))
        }
        other => Err(SessionError::rpc(-32602, format!("Unknown tool: {other}"))),
    }
}

pub struct FakeSession {
    pub tools: Vec<ToolDescriptor>,
    pub resources: Vec<ResourceDescriptor>,
    pub fail_initialize: bool,
    pub fail_tools: bool,
    pub fail_resources: bool,
    pub fail_read: bool,
    pub handler: ToolHandler,
    calls: Mutex<Vec<(String, Arguments)>>,
    reads: Mutex<Vec<String>>,
    list_tool_requests: AtomicUsize,
    closes: AtomicUsize,
}

impl FakeSession {
    pub fn new(tools: Vec<ToolDescriptor>) -> Self {
        Self {
            tools,
            resources: Vec::new(),
            fail_initialize: false,
            fail_tools: false,
            fail_resources: false,
            fail_read: false,
            handler: demo_handler,
            calls: Mutex::new(Vec::new()),
            reads: Mutex::new(Vec::new()),
            list_tool_requests: AtomicUsize::new(0),
            closes: AtomicUsize::new(0),
        }
    }

    pub fn with_resources(mut self, resources: Vec<ResourceDescriptor>) -> Self {
        self.resources = resources;
        self
    }

    pub async fn calls(&self) -> Vec<(String, Arguments)> {
        self.calls.lock().await.clone()
    }

    pub async fn call_names(&self) -> Vec<String> {
        self.calls
            .lock()
            .await
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub async fn reads(&self) -> Vec<String> {
        self.reads.lock().await.clone()
    }

    pub fn list_tool_requests(&self) -> usize {
        self.list_tool_requests.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProviderSession for FakeSession {
    async fn initialize(&self) -> Result<(), SessionError> {
        if self.fail_initialize {
            return Err(SessionError::transport("connection refused"));
        }
        Ok(())
    }

    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, SessionError> {
        self.list_tool_requests.fetch_add(1, Ordering::SeqCst);
        if self.fail_tools {
            return Err(SessionError::Timeout { seconds: 30 });
        }
        Ok(self.tools.clone())
    }

    async fn list_resources(&self) -> Result<Vec<ResourceDescriptor>, SessionError> {
        if self.fail_resources {
            return Err(SessionError::rpc(-32601, "Method not found"));
        }
        Ok(self.resources.clone())
    }

    async fn read_resource(&self, uri: &str) -> Result<ResourceContents, SessionError> {
        self.reads.lock().await.push(uri.to_string());
        if self.fail_read {
            return Err(SessionError::rpc(-32002, "Resource not found"));
        }
        Ok(ResourceContents::text(uri, format!("contents of {uri}")))
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Arguments,
    ) -> Result<ToolCallResult, SessionError> {
        let result = (self.handler)(name, &arguments);
        self.calls.lock().await.push((name.to_string(), arguments));
        result
    }

    async fn close(&self) -> Result<(), SessionError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Replies with scripted completions in order and records every request.
#[derive(Clone)]
pub struct ScriptedBackend {
    replies: Arc<Mutex<VecDeque<Result<Completion, ModelError>>>>,
    recordings: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<Result<Completion, ModelError>>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            recordings: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn answering(content: &str) -> Self {
        Self::new(vec![Ok(Completion::text(content))])
    }

    pub fn calling(calls: Vec<RawToolCall>) -> Self {
        Self::new(vec![Ok(Completion::tool_calls(calls))])
    }

    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.recordings.lock().await.clone()
    }
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ModelError> {
        self.recordings.lock().await.push(request);
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::invalid_response("scripted", "no reply scripted")))
    }
}

pub fn test_config() -> BridgeConfig {
    BridgeConfig::new(
        ModelSettings::new("test-model", "http://127.0.0.1:9").with_credential("sk-test"),
    )
}
