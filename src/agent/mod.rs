//! Agent module - the reasoning loop behind a lookup.
//!
//! The agent follows a "tools in a loop" pattern:
//! 1. Build context with system prompt and the research prompt
//! 2. Call LLM with available tools
//! 3. If LLM requests tool call, execute it and feed result back
//! 4. Repeat until LLM produces final response or max iterations reached

mod agent_loop;
mod prompt;

pub use agent_loop::Agent;
pub use prompt::{build_system_prompt, company_info_prompt};

use async_trait::async_trait;
use thiserror::Error;

use crate::llm::LlmError;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("LLM returned empty response")]
    EmptyResponse,

    #[error("Max iterations ({0}) reached without a final answer")]
    MaxIterations(usize),
}

/// Narrow capability seam between the retrieval service and the reasoning
/// loop: one prompt in, one free-text answer out. How many searches the
/// agent runs, or how it reasons, is not part of the contract.
#[async_trait]
pub trait LookupAgent: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AgentError>;
}
