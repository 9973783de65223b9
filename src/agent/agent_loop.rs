//! Core agent loop implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::Config;
use crate::llm::{ChatMessage, LlmClient, OpenAiClient, ToolCall};
use crate::tools::{ToolRegistry, WebSearch};

use super::prompt::build_system_prompt;
use super::{AgentError, LookupAgent};

/// The reasoning agent: an LLM with a web-search tool in a loop.
pub struct Agent {
    model: String,
    max_iterations: usize,
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
}

impl Agent {
    /// Create a new agent with the given configuration.
    pub fn new(config: &Config) -> Self {
        let llm = Arc::new(OpenAiClient::new(config.openai_api_key.clone()));
        let mut tools = ToolRegistry::new();
        tools.register(Box::new(WebSearch::new(config.serpapi_api_key.clone())));

        Self {
            model: config.default_model.clone(),
            max_iterations: config.max_iterations,
            llm,
            tools,
        }
    }

    /// Create an agent with an explicit client and tool set (useful for
    /// testing).
    pub fn with_client(
        model: String,
        max_iterations: usize,
        llm: Arc<dyn LlmClient>,
        tools: ToolRegistry,
    ) -> Self {
        Self {
            model,
            max_iterations,
            llm,
            tools,
        }
    }

    /// Run a research prompt and return the final free-text answer.
    pub async fn run(&self, prompt: &str) -> Result<String, AgentError> {
        // Build initial messages
        let system_prompt = build_system_prompt(&self.tools);
        let mut messages = vec![ChatMessage::system(system_prompt), ChatMessage::user(prompt)];

        // Get tool schemas for LLM
        let tool_schemas = self.tools.get_tool_schemas();

        // Agent loop
        for iteration in 0..self.max_iterations {
            tracing::debug!("Agent iteration {}", iteration + 1);

            // Call LLM
            let response = self
                .llm
                .chat_completion(&self.model, &messages, Some(&tool_schemas))
                .await?;

            // Check for tool calls
            if let Some(tool_calls) = response.tool_calls.clone() {
                if !tool_calls.is_empty() {
                    // Add assistant message with tool calls
                    messages.push(response);

                    // Execute each tool call
                    for tool_call in &tool_calls {
                        tracing::debug!(
                            "Calling tool: {} with args: {}",
                            tool_call.function.name,
                            tool_call.function.arguments
                        );

                        let result = self.execute_tool_call(tool_call).await;

                        let result_str = match result {
                            Ok(output) => output,
                            Err(e) => format!("Error: {}", e),
                        };

                        // Add tool result message
                        messages.push(ChatMessage::tool_result(tool_call.id.clone(), result_str));
                    }

                    continue;
                }
            }

            // No tool calls - this is the final response
            if let Some(content) = response.content {
                return Ok(content);
            }

            // Empty response - shouldn't happen but handle gracefully
            return Err(AgentError::EmptyResponse);
        }

        Err(AgentError::MaxIterations(self.max_iterations))
    }

    /// Execute a single tool call.
    async fn execute_tool_call(&self, tool_call: &ToolCall) -> anyhow::Result<String> {
        let args: Value =
            serde_json::from_str(&tool_call.function.arguments).unwrap_or(Value::Null);

        self.tools.execute(&tool_call.function.name, args).await
    }
}

#[async_trait]
impl LookupAgent for Agent {
    async fn generate(&self, prompt: &str) -> Result<String, AgentError> {
        self.run(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::llm::{FunctionCall, LlmError, Role};
    use crate::tools::Tool;

    /// LLM stub that replays a fixed sequence of assistant messages.
    struct ScriptedClient {
        responses: Mutex<VecDeque<ChatMessage>>,
    }

    impl ScriptedClient {
        fn new(responses: Vec<ChatMessage>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedClient {
        async fn chat_completion(
            &self,
            _model: &str,
            _messages: &[ChatMessage],
            _tools: Option<&[Value]>,
        ) -> Result<ChatMessage, LlmError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| LlmError::Malformed("script exhausted".to_string()))
        }
    }

    struct FakeSearch;

    #[async_trait]
    impl Tool for FakeSearch {
        fn name(&self) -> &str {
            "web_search"
        }

        fn description(&self) -> &str {
            "fake search"
        }

        fn parameters_schema(&self) -> Value {
            json!({"type": "object", "properties": {}})
        }

        async fn execute(&self, _args: Value) -> anyhow::Result<String> {
            Ok("**Acme**\nAcme official site\nURL: https://acme.example".to_string())
        }
    }

    fn tool_call_message(name: &str, arguments: &str) -> ChatMessage {
        ChatMessage {
            role: Role::Assistant,
            content: None,
            tool_calls: Some(vec![ToolCall {
                id: "call_1".to_string(),
                call_type: "function".to_string(),
                function: FunctionCall {
                    name: name.to_string(),
                    arguments: arguments.to_string(),
                },
            }]),
            tool_call_id: None,
        }
    }

    fn final_message(content: &str) -> ChatMessage {
        ChatMessage {
            role: Role::Assistant,
            content: Some(content.to_string()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    fn agent_with(llm: Arc<dyn LlmClient>) -> Agent {
        let mut tools = ToolRegistry::new();
        tools.register(Box::new(FakeSearch));
        Agent::with_client("test-model".to_string(), 3, llm, tools)
    }

    #[tokio::test]
    async fn loop_executes_tool_then_returns_final_answer() {
        let llm = Arc::new(ScriptedClient::new(vec![
            tool_call_message("web_search", r#"{"query":"Acme"}"#),
            final_message("Website - https://acme.example"),
        ]));

        let agent = agent_with(llm);
        let answer = agent.run("research Acme").await.unwrap();
        assert_eq!(answer, "Website - https://acme.example");
    }

    #[tokio::test]
    async fn tool_failure_is_fed_back_not_fatal() {
        let llm = Arc::new(ScriptedClient::new(vec![
            tool_call_message("no_such_tool", "{}"),
            final_message("done"),
        ]));

        let agent = agent_with(llm);
        // The unknown-tool error becomes a tool-result message; the loop
        // continues and the next response wins.
        let answer = agent.run("research Acme").await.unwrap();
        assert_eq!(answer, "done");
    }

    #[tokio::test]
    async fn stops_at_max_iterations() {
        let llm = Arc::new(ScriptedClient::new(vec![
            tool_call_message("web_search", "{}"),
            tool_call_message("web_search", "{}"),
            tool_call_message("web_search", "{}"),
        ]));

        let agent = agent_with(llm);
        let err = agent.run("research Acme").await.unwrap_err();
        assert!(matches!(err, AgentError::MaxIterations(3)));
    }

    #[tokio::test]
    async fn empty_response_is_an_error() {
        let llm = Arc::new(ScriptedClient::new(vec![ChatMessage {
            role: Role::Assistant,
            content: None,
            tool_calls: None,
            tool_call_id: None,
        }]));

        let agent = agent_with(llm);
        let err = agent.run("research Acme").await.unwrap_err();
        assert!(matches!(err, AgentError::EmptyResponse));
    }
}
