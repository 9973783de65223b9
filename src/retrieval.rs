//! The retrieval service: prompt in, structured record out.

use std::sync::Arc;

use crate::agent::{company_info_prompt, Agent, AgentError, LookupAgent};
use crate::config::Config;
use crate::extract::{CompanyRecord, Extractor};

/// Retrieves structured company information via the reasoning agent.
pub struct CompanyInfoService {
    agent: Arc<dyn LookupAgent>,
    extractor: Extractor,
}

impl CompanyInfoService {
    /// Create a service backed by the production agent.
    pub fn new(config: &Config) -> Self {
        Self::with_agent(Arc::new(Agent::new(config)))
    }

    /// Create a service with an explicit agent (useful for testing).
    pub fn with_agent(agent: Arc<dyn LookupAgent>) -> Self {
        Self {
            agent,
            extractor: Extractor::new(),
        }
    }

    /// Look up one company. Returns the parsed record, which is empty when
    /// nothing in the agent's answer matched. Agent failures propagate.
    pub async fn retrieve(&self, company_name: &str) -> Result<CompanyRecord, AgentError> {
        tracing::info!("Looking up company: {}", company_name);

        let prompt = company_info_prompt(company_name);
        let answer = self.agent.generate(&prompt).await?;

        tracing::debug!("Agent answered with {} chars", answer.len());

        let record = self.extractor.parse(&answer);
        if record.is_empty() {
            tracing::info!("No recognized fields in answer for: {}", company_name);
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm::LlmError;

    /// Agent stub returning a canned answer, recording the prompt it saw.
    struct CannedAgent {
        answer: Option<String>,
        seen_prompt: Mutex<Option<String>>,
    }

    impl CannedAgent {
        fn answering(answer: &str) -> Self {
            Self {
                answer: Some(answer.to_string()),
                seen_prompt: Mutex::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                answer: None,
                seen_prompt: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl LookupAgent for CannedAgent {
        async fn generate(&self, prompt: &str) -> Result<String, AgentError> {
            *self.seen_prompt.lock().unwrap() = Some(prompt.to_string());
            match &self.answer {
                Some(answer) => Ok(answer.clone()),
                None => Err(AgentError::Llm(LlmError::Api {
                    status: 429,
                    message: "quota exceeded".to_string(),
                })),
            }
        }
    }

    #[tokio::test]
    async fn prompt_carries_the_exact_company_name() {
        let agent = Arc::new(CannedAgent::answering("nothing useful"));
        let service = CompanyInfoService::with_agent(agent.clone());

        service.retrieve("Wayne Enterprises").await.unwrap();

        let prompt = agent.seen_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("Wayne Enterprises"));
    }

    #[tokio::test]
    async fn answer_is_parsed_into_a_record() {
        let agent = Arc::new(CannedAgent::answering(
            "Their contact is support@wayne.example\nWebsite - https://wayne.example",
        ));
        let service = CompanyInfoService::with_agent(agent);

        let record = service.retrieve("Wayne Enterprises").await.unwrap();
        assert_eq!(record.get("Website"), Some("https://wayne.example"));
        assert_eq!(record.get("Email"), Some("support@wayne.example"));
    }

    #[tokio::test]
    async fn unrecognized_answer_yields_empty_record() {
        let agent = Arc::new(CannedAgent::answering("I have no idea!"));
        let service = CompanyInfoService::with_agent(agent);

        let record = service.retrieve("Mystery Inc").await.unwrap();
        assert!(record.is_empty());
    }

    #[tokio::test]
    async fn agent_failure_propagates() {
        let service = CompanyInfoService::with_agent(Arc::new(CannedAgent::failing()));

        let err = service.retrieve("Acme").await.unwrap_err();
        assert!(matches!(err, AgentError::Llm(_)));
    }
}
